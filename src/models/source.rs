//! Identifies which system of record a value came from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two systems being reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSystem {
    /// The HR roster.
    Hr,
    /// The Payroll ledger.
    Payroll,
}

impl SourceSystem {
    /// The name of the status column specific to this source.
    pub fn status_column(self) -> &'static str {
        match self {
            SourceSystem::Hr => "EmploymentStatus",
            SourceSystem::Payroll => "PayrollStatus",
        }
    }

    /// The suffix used for this source's columns in joined tables.
    pub fn column_suffix(self) -> &'static str {
        match self {
            SourceSystem::Hr => "_HR",
            SourceSystem::Payroll => "_Payroll",
        }
    }
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSystem::Hr => write!(f, "HR"),
            SourceSystem::Payroll => write!(f, "Payroll"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names() {
        assert_eq!(SourceSystem::Hr.to_string(), "HR");
        assert_eq!(SourceSystem::Payroll.to_string(), "Payroll");
    }

    #[test]
    fn test_status_columns() {
        assert_eq!(SourceSystem::Hr.status_column(), "EmploymentStatus");
        assert_eq!(SourceSystem::Payroll.status_column(), "PayrollStatus");
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&SourceSystem::Hr).unwrap(), "\"hr\"");
        assert_eq!(
            serde_json::to_string(&SourceSystem::Payroll).unwrap(),
            "\"payroll\""
        );
    }
}
