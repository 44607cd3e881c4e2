//! Artifact naming and lookup.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use glob::Pattern;

use crate::error::{AuditError, AuditResult};

/// Format of the audit timestamp used in artifact names.
pub const AUDIT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File name prefix of the reconciliation workbook.
pub const WORKBOOK_PREFIX: &str = "payroll_reconciliation_report_";
/// File name prefix of the JSON summary.
pub const SUMMARY_PREFIX: &str = "audit_summary_";

/// Formats a moment as an audit timestamp.
pub fn audit_timestamp<Tz: TimeZone>(moment: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    moment.format(AUDIT_TIMESTAMP_FORMAT).to_string()
}

/// Path of the workbook for a run.
pub fn workbook_path(dir: &Path, timestamp: &str) -> PathBuf {
    dir.join(format!("{WORKBOOK_PREFIX}{timestamp}.xlsx"))
}

/// Path of the summary for a run.
pub fn summary_path(dir: &Path, timestamp: &str) -> PathBuf {
    dir.join(format!("{SUMMARY_PREFIX}{timestamp}.json"))
}

/// Path of a chart for a run.
pub fn chart_path(dir: &Path, stem: &str, timestamp: &str) -> PathBuf {
    dir.join(format!("{stem}_{timestamp}.svg"))
}

/// The workbook and summary a chart run reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArtifacts {
    /// The most recent workbook.
    pub workbook: PathBuf,
    /// The most recent summary.
    pub summary: PathBuf,
}

impl ReportArtifacts {
    /// The audit timestamp embedded in the workbook name.
    pub fn timestamp(&self) -> Option<&str> {
        self.workbook
            .file_stem()?
            .to_str()?
            .strip_prefix(WORKBOOK_PREFIX)
    }
}

fn latest_match(dir: &Path, prefix: &str, extension: &str) -> Option<PathBuf> {
    let pattern = format!(
        "{}/{prefix}*.{extension}",
        Pattern::escape(&dir.to_string_lossy())
    );
    glob::glob(&pattern)
        .ok()?
        .filter_map(Result::ok)
        .filter(|path| path.is_file())
        .max()
}

/// Finds the most recent workbook and summary in `dir`.
///
/// "Most recent" is the lexicographically greatest name, which matches
/// chronological order for audit timestamps.
///
/// # Errors
///
/// Returns `ArtifactsNotFound` unless both a workbook and a summary exist.
pub fn find_latest(dir: &Path) -> AuditResult<ReportArtifacts> {
    let workbook = latest_match(dir, WORKBOOK_PREFIX, "xlsx");
    let summary = latest_match(dir, SUMMARY_PREFIX, "json");

    match (workbook, summary) {
        (Some(workbook), Some(summary)) => Ok(ReportArtifacts { workbook, summary }),
        _ => Err(AuditError::ArtifactsNotFound {
            dir: dir.display().to_string(),
        }),
    }
}
