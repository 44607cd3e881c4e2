//! Error types for the payroll audit.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while loading, reconciling, exporting
//! and charting.

use thiserror::Error;

use crate::models::SourceSystem;

/// The main error type for the payroll audit.
///
/// Loader, engine and configuration errors are fatal for a run. Export and
/// chart errors are scoped to the single artifact that failed.
///
/// # Example
///
/// ```
/// use payroll_audit::error::AuditError;
/// use payroll_audit::models::SourceSystem;
///
/// let error = AuditError::SchemaValidation {
///     system: SourceSystem::Payroll,
///     missing: vec!["Pay".to_string(), "PayrollStatus".to_string()],
/// };
/// assert_eq!(
///     error.to_string(),
///     "Missing required columns in Payroll data: Pay, PayrollStatus"
/// );
/// ```
#[derive(Debug, Error)]
pub enum AuditError {
    /// A source file could not be opened or read.
    #[error("Failed to read {system} data from '{path}': {message}")]
    SourceRead {
        /// The source being read.
        system: SourceSystem,
        /// The path of the file.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// One or more required columns are absent from a source.
    #[error("Missing required columns in {system} data: {}", .missing.join(", "))]
    SchemaValidation {
        /// The source missing the columns.
        system: SourceSystem,
        /// Every required column that was not found, in schema order.
        missing: Vec<String>,
    },

    /// A pay-period-end value could not be parsed as a date.
    #[error("{system} data line {line} (employee '{employee_id}'): cannot parse date '{value}'")]
    DateParse {
        /// The source containing the bad value.
        system: SourceSystem,
        /// The 1-based line in the source file.
        line: u64,
        /// The identifier on the offending row.
        employee_id: String,
        /// The raw cell value.
        value: String,
    },

    /// A field held a value that cannot be used (non-numeric pay, blank identifier).
    #[error("{system} data line {line}: invalid value '{value}' in column '{column}'")]
    InvalidField {
        /// The source containing the bad value.
        system: SourceSystem,
        /// The 1-based line in the source file.
        line: u64,
        /// The column holding the value.
        column: String,
        /// The raw cell value.
        value: String,
    },

    /// An unexpected failure while joining or aggregating.
    #[error("Reconciliation failed: {message}")]
    Reconciliation {
        /// A description of the failure.
        message: String,
    },

    /// A report artifact could not be written.
    #[error("Failed to export {artifact}: {message}")]
    Export {
        /// The artifact being written (e.g. "workbook").
        artifact: String,
        /// A description of the failure.
        message: String,
    },

    /// A chart could not be generated.
    #[error("Failed to generate {chart} chart: {message}")]
    Chart {
        /// The chart being generated.
        chart: String,
        /// A description of the failure.
        message: String,
    },

    /// No exported artifacts were found to chart.
    #[error("No audit report files found in '{dir}'")]
    ArtifactsNotFound {
        /// The directory that was searched.
        dir: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The logging subscriber could not be installed.
    #[error("Failed to initialise logging: {message}")]
    Logging {
        /// A description of the failure.
        message: String,
    },
}

impl AuditError {
    /// Returns true for errors that must abort the whole run.
    ///
    /// Export and chart failures only affect their own artifact.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            AuditError::Export { .. } | AuditError::Chart { .. } | AuditError::ArtifactsNotFound { .. }
        )
    }
}

/// A type alias for Results that return AuditError.
pub type AuditResult<T> = Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_validation_lists_every_missing_column() {
        let error = AuditError::SchemaValidation {
            system: SourceSystem::Hr,
            missing: vec!["Department".to_string(), "PayPeriodEnd".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Missing required columns in HR data: Department, PayPeriodEnd"
        );
    }

    #[test]
    fn test_date_parse_displays_line_and_value() {
        let error = AuditError::DateParse {
            system: SourceSystem::Payroll,
            line: 7,
            employee_id: "E1007".to_string(),
            value: "31/31/2025".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Payroll data line 7 (employee 'E1007'): cannot parse date '31/31/2025'"
        );
    }

    #[test]
    fn test_invalid_field_displays_column() {
        let error = AuditError::InvalidField {
            system: SourceSystem::Hr,
            line: 3,
            column: "Pay".to_string(),
            value: "n/a".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "HR data line 3: invalid value 'n/a' in column 'Pay'"
        );
    }

    #[test]
    fn test_reconciliation_error_displays_message() {
        let error = AuditError::Reconciliation {
            message: "decimal overflow".to_string(),
        };
        assert_eq!(error.to_string(), "Reconciliation failed: decimal overflow");
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = AuditError::ConfigNotFound {
            path: "/missing/audit.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/audit.yaml"
        );
    }

    #[test]
    fn test_export_and_chart_errors_are_not_fatal() {
        let export = AuditError::Export {
            artifact: "workbook".to_string(),
            message: "disk full".to_string(),
        };
        let chart = AuditError::Chart {
            chart: "summary pie".to_string(),
            message: "nothing to plot".to_string(),
        };
        assert!(!export.is_fatal());
        assert!(!chart.is_fatal());
        assert!(
            AuditError::Reconciliation {
                message: "x".to_string()
            }
            .is_fatal()
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<AuditError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> AuditResult<()> {
            Err(AuditError::ArtifactsNotFound {
                dir: "output".to_string(),
            })
        }

        fn propagates_error() -> AuditResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
