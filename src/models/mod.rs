//! Core data models for the payroll audit.
//!
//! This module contains the typed source records, the joined row, and the
//! structures that make up a reconciliation result.

mod employee_record;
mod joined_row;
mod payroll_record;
mod reconciliation_result;
mod record;
mod source;

pub use employee_record::EmployeeRecord;
pub use joined_row::JoinedRow;
pub use payroll_record::PayrollRecord;
pub use reconciliation_result::{
    AuditStatistics, Classification, ClassifiedRow, DepartmentAggregate, DuplicateResolution,
    ReconciliationResult,
};
pub use record::{RecordFields, SourceRecord};
pub use source::SourceSystem;
