//! Reconciliation result models.
//!
//! This module contains the [`ReconciliationResult`] type and the structures
//! it is made of: classified rows, department aggregates, run statistics and
//! the record of duplicate identifiers resolved during the join.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{JoinedRow, SourceSystem};

/// The discrepancy bucket of a joined row.
///
/// # Example
///
/// ```
/// use payroll_audit::models::Classification;
///
/// assert!(Classification::Mismatch.is_discrepancy());
/// assert!(!Classification::Reconciled.is_discrepancy());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Both sides present and pay differs by more than the tolerance.
    Mismatch,
    /// Present in Payroll, absent from HR.
    MissingInHr,
    /// Present in HR, absent from Payroll.
    MissingInPayroll,
    /// Both sides present and pay agrees within the tolerance.
    Reconciled,
}

impl Classification {
    /// Returns true for the three discrepancy buckets.
    pub fn is_discrepancy(self) -> bool {
        !matches!(self, Classification::Reconciled)
    }
}

/// A joined row together with its classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRow {
    /// The joined row.
    pub row: JoinedRow,
    /// The bucket the row was placed in.
    pub classification: Classification,
}

/// Totals for one HR department.
///
/// `discrepancy` is the absolute difference of the two sums, so offsetting
/// per-row differences cancel out.
///
/// # Example
///
/// ```
/// use payroll_audit::models::DepartmentAggregate;
/// use rust_decimal::Decimal;
///
/// let aggregate = DepartmentAggregate {
///     department: "Mathematics".to_string(),
///     employee_count: 2,
///     pay_hr: Decimal::new(12000, 0),
///     pay_payroll: Decimal::new(12100, 0),
///     discrepancy: Decimal::new(100, 0),
/// };
/// assert!(aggregate.has_discrepancy());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentAggregate {
    /// The HR department value.
    pub department: String,
    /// Number of joined rows in the department.
    pub employee_count: usize,
    /// Sum of HR pay (absent pay counts as zero).
    pub pay_hr: Decimal,
    /// Sum of Payroll pay (absent pay counts as zero).
    pub pay_payroll: Decimal,
    /// `|pay_hr - pay_payroll|`.
    pub discrepancy: Decimal,
}

impl DepartmentAggregate {
    /// Returns true when the department's sums disagree at all.
    pub fn has_discrepancy(&self) -> bool {
        self.discrepancy > Decimal::ZERO
    }
}

/// Summary counts for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStatistics {
    /// Number of joined rows.
    pub total_records: usize,
    /// Rows classified as [`Classification::Mismatch`].
    pub mismatches: usize,
    /// Rows classified as [`Classification::MissingInHr`].
    pub missing_in_hr: usize,
    /// Rows classified as [`Classification::MissingInPayroll`].
    pub missing_in_payroll: usize,
    /// Sum of per-row `|pay_HR - pay_Payroll|` over mismatches only.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_discrepancy_amount: Decimal,
}

impl AuditStatistics {
    /// Total rows in any discrepancy bucket.
    pub fn total_issues(&self) -> usize {
        self.mismatches + self.missing_in_hr + self.missing_in_payroll
    }

    /// Rows that reconciled cleanly.
    pub fn reconciled(&self) -> usize {
        self.total_records.saturating_sub(self.total_issues())
    }
}

/// An identifier that appeared more than once in one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateResolution {
    /// The source holding the duplicates.
    pub system: SourceSystem,
    /// The duplicated identifier.
    pub employee_id: String,
    /// Lines of every occurrence, in file order.
    pub lines: Vec<u64>,
    /// The line of the record that was kept.
    pub kept_line: u64,
}

/// The canonical output of one reconciliation run.
///
/// Either the whole result is produced or none of it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Every joined row, ordered by identifier.
    pub rows: Vec<ClassifiedRow>,
    /// Per-department aggregates, ordered by department.
    pub departments: Vec<DepartmentAggregate>,
    /// Run statistics.
    pub statistics: AuditStatistics,
    /// Duplicate identifiers resolved by the join.
    #[serde(default)]
    pub duplicates: Vec<DuplicateResolution>,
}

impl ReconciliationResult {
    /// Rows in the given bucket, in identifier order.
    pub fn rows_with(&self, classification: Classification) -> impl Iterator<Item = &JoinedRow> {
        self.rows
            .iter()
            .filter(move |classified| classified.classification == classification)
            .map(|classified| &classified.row)
    }

    /// Mismatched rows.
    pub fn mismatches(&self) -> impl Iterator<Item = &JoinedRow> {
        self.rows_with(Classification::Mismatch)
    }

    /// Rows present in Payroll but not HR.
    pub fn missing_in_hr(&self) -> impl Iterator<Item = &JoinedRow> {
        self.rows_with(Classification::MissingInHr)
    }

    /// Rows present in HR but not Payroll.
    pub fn missing_in_payroll(&self) -> impl Iterator<Item = &JoinedRow> {
        self.rows_with(Classification::MissingInPayroll)
    }

    /// Number of departments whose sums disagree.
    pub fn departments_with_discrepancies(&self) -> usize {
        self.departments
            .iter()
            .filter(|aggregate| aggregate.has_discrepancy())
            .count()
    }

    /// Looks up the classification of an identifier.
    pub fn classification_of(&self, employee_id: &str) -> Option<Classification> {
        self.rows
            .iter()
            .find(|classified| classified.row.employee_id() == employee_id)
            .map(|classified| classified.classification)
    }

    /// Looks up a department aggregate by name.
    pub fn department(&self, name: &str) -> Option<&DepartmentAggregate> {
        self.departments
            .iter()
            .find(|aggregate| aggregate.department == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_serialize_amount_as_number() {
        let stats = AuditStatistics {
            total_records: 4,
            mismatches: 1,
            missing_in_hr: 1,
            missing_in_payroll: 1,
            total_discrepancy_amount: Decimal::new(10050, 2),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_discrepancy_amount"], serde_json::json!(100.5));
        assert_eq!(json["missing_in_hr"], 1);
    }

    #[test]
    fn test_total_issues_and_reconciled() {
        let stats = AuditStatistics {
            total_records: 10,
            mismatches: 2,
            missing_in_hr: 3,
            missing_in_payroll: 1,
            total_discrepancy_amount: Decimal::ZERO,
        };
        assert_eq!(stats.total_issues(), 6);
        assert_eq!(stats.reconciled(), 4);
    }

    #[test]
    fn test_classification_serialization() {
        assert_eq!(
            serde_json::to_string(&Classification::MissingInHr).unwrap(),
            "\"missing_in_hr\""
        );
        assert_eq!(
            serde_json::to_string(&Classification::Reconciled).unwrap(),
            "\"reconciled\""
        );
    }

    #[test]
    fn test_zero_discrepancy_department_is_not_counted() {
        let aggregate = DepartmentAggregate {
            department: "CS".to_string(),
            employee_count: 2,
            pay_hr: Decimal::new(10000, 0),
            pay_payroll: Decimal::new(10000, 0),
            discrepancy: Decimal::ZERO,
        };
        assert!(!aggregate.has_discrepancy());
    }
}
