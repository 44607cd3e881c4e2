//! Record loading for the two systems of record.
//!
//! The loader reads a delimited file, checks that every required column is
//! present, and normalises each row into a typed record. It fails fast: the
//! first schema, date or value problem aborts the load.

mod dates;
mod delimited;

use std::fs;
use std::path::Path;

use tracing::{Span, info};

use crate::config::LoaderConfig;
use crate::error::{AuditError, AuditResult};
use crate::models::{EmployeeRecord, PayrollRecord, SourceRecord};

pub use dates::parse_date;
pub use delimited::{REQUIRED_COLUMNS, parse_records, required_columns, sniff_delimiter};

/// Loads HR and Payroll sources into typed records.
///
/// # Example
///
/// ```no_run
/// use payroll_audit::config::LoaderConfig;
/// use payroll_audit::loader::RecordLoader;
///
/// let loader = RecordLoader::new(LoaderConfig::default());
/// let hr = loader.load_hr("data/hr_system_data.csv")?;
/// let payroll = loader.load_payroll("data/payroll_system_data.csv")?;
/// println!("{} HR records, {} Payroll records", hr.len(), payroll.len());
/// # Ok::<(), payroll_audit::error::AuditError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RecordLoader {
    options: LoaderConfig,
    span: Span,
}

impl RecordLoader {
    /// Creates a loader with the given options.
    pub fn new(options: LoaderConfig) -> Self {
        Self {
            options,
            span: Span::current(),
        }
    }

    /// Logs inside the given span instead of the caller's current one.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Loads the HR roster.
    pub fn load_hr<P: AsRef<Path>>(&self, path: P) -> AuditResult<Vec<EmployeeRecord>> {
        self.load_file(path.as_ref())
    }

    /// Loads the Payroll ledger.
    pub fn load_payroll<P: AsRef<Path>>(&self, path: P) -> AuditResult<Vec<PayrollRecord>> {
        self.load_file(path.as_ref())
    }

    /// Loads any source file into records of type `R`.
    pub fn load_file<R: SourceRecord>(&self, path: &Path) -> AuditResult<Vec<R>> {
        let _entered = self.span.enter();

        let content = fs::read_to_string(path).map_err(|e| AuditError::SourceRead {
            system: R::SYSTEM,
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let records = self.load_str::<R>(&content)?;

        info!(
            system = %R::SYSTEM,
            path = %path.display(),
            records = records.len(),
            "Source loaded and validated"
        );

        Ok(records)
    }

    /// Parses in-memory delimited text into records of type `R`.
    pub fn load_str<R: SourceRecord>(&self, content: &str) -> AuditResult<Vec<R>> {
        let delimiter = match self.options.delimiter {
            Some(delimiter) if delimiter.is_ascii() => delimiter as u8,
            Some(delimiter) => {
                return Err(AuditError::InvalidField {
                    system: R::SYSTEM,
                    line: 1,
                    column: "<delimiter>".to_string(),
                    value: delimiter.to_string(),
                });
            }
            None => sniff_delimiter(content.trim_start_matches('\u{feff}')),
        };

        parse_records::<R>(content, delimiter, &self.options)
    }
}
