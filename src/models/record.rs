//! The shape shared by records from either source.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::SourceSystem;

/// Normalised field values of one source row, before they are given a
/// source-specific type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFields {
    /// The employee identifier (never blank).
    pub employee_id: String,
    /// The pay amount, absent when the cell was blank.
    pub pay: Option<Decimal>,
    /// The job position.
    pub position: Option<String>,
    /// The department.
    pub department: Option<String>,
    /// The value of the source-specific status column.
    pub status: Option<String>,
    /// The end of the pay period.
    pub pay_period_end: Option<NaiveDate>,
    /// The 1-based line of the row in its source file.
    pub line: u64,
}

/// A typed record loaded from one of the two sources.
///
/// Implemented by [`EmployeeRecord`](super::EmployeeRecord) and
/// [`PayrollRecord`](super::PayrollRecord) so loading and joining can be
/// written once for both.
pub trait SourceRecord: Clone {
    /// The source this record type belongs to.
    const SYSTEM: SourceSystem;

    /// Builds the record from normalised fields.
    fn from_fields(fields: RecordFields) -> Self;

    /// The join key.
    fn employee_id(&self) -> &str;

    /// The pay amount, if present.
    fn pay(&self) -> Option<Decimal>;

    /// The 1-based line the record came from.
    fn line(&self) -> u64;
}
