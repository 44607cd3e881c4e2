//! Report export.
//!
//! The exporter turns a [`ReconciliationResult`] into a workbook and a JSON
//! summary, both named after the run's audit timestamp. Each artifact is
//! written independently.

pub mod artifacts;
mod summary;
pub mod tables;
mod workbook;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{Span, error, info};

use crate::error::{AuditError, AuditResult};
use crate::models::ReconciliationResult;

pub use artifacts::{ReportArtifacts, audit_timestamp, find_latest};
pub use summary::AuditSummary;
pub use tables::{Cell, ReportTable, build_tables};
pub use workbook::{read_table, write_workbook};

/// Outcome of writing every artifact of one run.
#[derive(Debug)]
pub struct ExportOutcome {
    /// The workbook path, or why it could not be written.
    pub workbook: AuditResult<PathBuf>,
    /// The summary path, or why it could not be written.
    pub summary: AuditResult<PathBuf>,
}

impl ExportOutcome {
    /// Returns true when both artifacts were written.
    pub fn is_complete(&self) -> bool {
        self.workbook.is_ok() && self.summary.is_ok()
    }

    /// Errors of the artifacts that failed.
    pub fn errors(&self) -> impl Iterator<Item = &AuditError> {
        [&self.workbook, &self.summary]
            .into_iter()
            .filter_map(|outcome| outcome.as_ref().err())
    }
}

/// Writes report artifacts for one run into an output directory.
#[derive(Debug, Clone)]
pub struct ReportExporter {
    output_dir: PathBuf,
    audit_timestamp: String,
    span: Span,
}

impl ReportExporter {
    /// Creates an exporter for the run stamped `audit_timestamp`.
    pub fn new(output_dir: impl Into<PathBuf>, audit_timestamp: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            audit_timestamp: audit_timestamp.into(),
            span: Span::current(),
        }
    }

    /// Logs inside the given span instead of the caller's current one.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// The directory artifacts are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_output_dir(&self, artifact: &str) -> AuditResult<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| AuditError::Export {
            artifact: artifact.to_string(),
            message: format!(
                "cannot create output directory '{}': {}",
                self.output_dir.display(),
                e
            ),
        })
    }

    /// Writes the four-sheet workbook.
    ///
    /// # Errors
    ///
    /// Returns `Export` if the directory or the file cannot be written.
    pub fn export_workbook(&self, result: &ReconciliationResult) -> AuditResult<PathBuf> {
        let _entered = self.span.enter();
        self.ensure_output_dir("workbook")?;

        let path = artifacts::workbook_path(&self.output_dir, &self.audit_timestamp);
        write_workbook(&build_tables(result), &path)?;

        info!(path = %path.display(), "Reconciliation workbook written");
        Ok(path)
    }

    /// Writes the JSON summary.
    ///
    /// # Errors
    ///
    /// Returns `Export` if the directory or the file cannot be written.
    pub fn export_summary(&self, result: &ReconciliationResult) -> AuditResult<PathBuf> {
        let _entered = self.span.enter();
        self.ensure_output_dir("summary")?;

        let export_error = |message: String| AuditError::Export {
            artifact: "summary".to_string(),
            message,
        };

        let path = artifacts::summary_path(&self.output_dir, &self.audit_timestamp);
        let json = AuditSummary::from_result(result, &self.audit_timestamp)
            .to_json_pretty()
            .map_err(|e| export_error(e.to_string()))?;
        fs::write(&path, json)
            .map_err(|e| export_error(format!("failed to write '{}': {}", path.display(), e)))?;

        info!(path = %path.display(), "Audit summary written");
        Ok(path)
    }

    /// Writes every artifact. A failure in one does not stop the other.
    pub fn export_all(&self, result: &ReconciliationResult) -> ExportOutcome {
        let outcome = ExportOutcome {
            workbook: self.export_workbook(result),
            summary: self.export_summary(result),
        };

        let _entered = self.span.enter();
        for err in outcome.errors() {
            error!(error = %err, "Report export failed");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRecord, PayrollRecord};
    use crate::reconciliation::reconcile;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn result() -> ReconciliationResult {
        let hr = EmployeeRecord {
            employee_id: "E2".to_string(),
            pay: Some(Decimal::new(6000, 0)),
            position: Some("Professor".to_string()),
            department: Some("Math".to_string()),
            employment_status: Some("Active".to_string()),
            pay_period_end: None,
            line: 2,
        };
        let payroll = PayrollRecord {
            employee_id: "E2".to_string(),
            pay: Some(Decimal::new(6100, 0)),
            position: Some("Professor".to_string()),
            department: Some("Math".to_string()),
            payroll_status: Some("Processed".to_string()),
            pay_period_end: None,
            line: 2,
        };
        reconcile(&[hr], &[payroll]).unwrap()
    }

    #[test]
    fn test_export_all_creates_directory_and_artifacts() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("nested").join("output");
        let exporter = ReportExporter::new(&output, "20250131_090000");

        let outcome = exporter.export_all(&result());

        assert!(outcome.is_complete());
        assert!(output.join("payroll_reconciliation_report_20250131_090000.xlsx").is_file());
        assert!(output.join("audit_summary_20250131_090000.json").is_file());
    }

    #[test]
    fn test_summary_file_contents() {
        let dir = TempDir::new().unwrap();
        let exporter = ReportExporter::new(dir.path(), "20250131_090000");

        let path = exporter.export_summary(&result()).unwrap();
        let summary = AuditSummary::from_json(&fs::read_to_string(path).unwrap()).unwrap();

        assert_eq!(summary.audit_date, "20250131_090000");
        assert_eq!(summary.statistics.mismatches, 1);
        assert_eq!(summary.statistics.total_discrepancy_amount, Decimal::new(100, 0));
        assert_eq!(summary.departments_with_discrepancies, 1);
    }

    #[test]
    fn test_workbook_failure_does_not_stop_summary() {
        let dir = TempDir::new().unwrap();
        let exporter = ReportExporter::new(dir.path(), "20250131_090000");
        // A directory where the workbook file should go makes the save fail.
        fs::create_dir(dir.path().join("payroll_reconciliation_report_20250131_090000.xlsx"))
            .unwrap();

        let outcome = exporter.export_all(&result());

        assert!(matches!(outcome.workbook, Err(AuditError::Export { .. })));
        assert!(outcome.summary.is_ok());
        assert!(!outcome.is_complete());
        assert_eq!(outcome.errors().count(), 1);
    }

    #[test]
    fn test_output_dir_that_is_a_file_fails_both() {
        let dir = TempDir::new().unwrap();
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, b"").unwrap();

        let outcome = ReportExporter::new(&blocked, "20250131_090000").export_all(&result());

        assert!(outcome.workbook.is_err());
        assert!(outcome.summary.is_err());
    }
}
