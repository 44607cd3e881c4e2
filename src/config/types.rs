//! Configuration types for the payroll audit.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default so an empty file, or no file at all, yields a usable config.

use serde::Deserialize;
use std::path::PathBuf;

/// Date formats tried, in order, when normalising `PayPeriodEnd`.
pub const DEFAULT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%d-%b-%Y",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Cell values read as absent, in addition to a blank cell.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// How the join treats an identifier that appears more than once in a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the occurrence that appears last in the file.
    #[default]
    KeepLast,
    /// Keep the occurrence that appears first in the file.
    KeepFirst,
    /// Fail the reconciliation.
    Reject,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// File the log is appended to, in addition to the console.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some(PathBuf::from("payroll_audit.log")),
        }
    }
}

/// Loader settings for the two delimited sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Field delimiter; sniffed from the header line when unset.
    pub delimiter: Option<char>,
    /// `chrono` formats accepted for `PayPeriodEnd`, tried in order.
    pub date_formats: Vec<String>,
    /// Markers that mean "no value" in any cell, matched exactly after trimming.
    pub na_values: Vec<String>,
}

impl LoaderConfig {
    /// Returns true when a trimmed cell holds one of the absent markers.
    pub fn is_na(&self, value: &str) -> bool {
        self.na_values.iter().any(|marker| marker == value)
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            na_values: DEFAULT_NA_VALUES.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// The complete configuration for one audit run.
///
/// # Example
///
/// ```
/// use payroll_audit::config::{AuditConfig, DuplicatePolicy};
///
/// let config = AuditConfig::default();
/// assert_eq!(config.duplicate_policy, DuplicatePolicy::KeepLast);
/// assert_eq!(config.output_dir.to_str(), Some("output"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Path of the HR roster.
    pub hr_file: PathBuf,
    /// Path of the Payroll ledger.
    pub payroll_file: PathBuf,
    /// Directory receiving the report artifacts and charts.
    pub output_dir: PathBuf,
    /// Duplicate identifier handling for the join.
    pub duplicate_policy: DuplicatePolicy,
    /// Loader settings.
    pub loader: LoaderConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            hr_file: PathBuf::from("hr_system_data.csv"),
            payroll_file: PathBuf::from("payroll_system_data.csv"),
            output_dir: PathBuf::from("output"),
            duplicate_policy: DuplicatePolicy::default(),
            loader: LoaderConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
