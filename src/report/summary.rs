//! The JSON audit summary.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::models::{AuditStatistics, ReconciliationResult};

/// Run-level figures written alongside the workbook.
///
/// # Example
///
/// ```
/// use payroll_audit::models::AuditStatistics;
/// use payroll_audit::report::AuditSummary;
/// use rust_decimal::Decimal;
///
/// let summary = AuditSummary {
///     audit_date: "20250131_090000".to_string(),
///     statistics: AuditStatistics {
///         total_records: 2,
///         mismatches: 1,
///         missing_in_hr: 0,
///         missing_in_payroll: 0,
///         total_discrepancy_amount: Decimal::new(100, 0),
///     },
///     departments_with_discrepancies: 1,
/// };
/// let json = summary.to_json_pretty().unwrap();
/// assert!(json.contains("    \"audit_date\": \"20250131_090000\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditSummary {
    /// The run's audit timestamp.
    pub audit_date: String,
    /// Run statistics.
    pub statistics: AuditStatistics,
    /// Aggregates with a non-zero discrepancy.
    pub departments_with_discrepancies: usize,
}

impl AuditSummary {
    /// Builds the summary of a result.
    pub fn from_result(result: &ReconciliationResult, audit_date: &str) -> Self {
        Self {
            audit_date: audit_date.to_string(),
            statistics: result.statistics.clone(),
            departments_with_discrepancies: result.departments_with_discrepancies(),
        }
    }

    /// Serialises with a four-space indent.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8.
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Parses a summary previously written by [`AuditSummary::to_json_pretty`].
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn summary() -> AuditSummary {
        AuditSummary {
            audit_date: "20250131_090000".to_string(),
            statistics: AuditStatistics {
                total_records: 12,
                mismatches: 3,
                missing_in_hr: 2,
                missing_in_payroll: 2,
                total_discrepancy_amount: Decimal::new(3505, 1),
            },
            departments_with_discrepancies: 4,
        }
    }

    #[test]
    fn test_summary_layout() {
        let json = summary().to_json_pretty().unwrap();
        let expected = r#"{
    "audit_date": "20250131_090000",
    "statistics": {
        "total_records": 12,
        "mismatches": 3,
        "missing_in_hr": 2,
        "missing_in_payroll": 2,
        "total_discrepancy_amount": 350.5
    },
    "departments_with_discrepancies": 4
}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_summary_round_trip() {
        let original = summary();
        let json = original.to_json_pretty().unwrap();
        assert_eq!(AuditSummary::from_json(&json).unwrap(), original);
    }

    #[test]
    fn test_malformed_summary_is_rejected() {
        assert!(AuditSummary::from_json("{\"audit_date\": 1}").is_err());
    }
}
