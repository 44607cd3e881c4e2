//! HR-side employee record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RecordFields, SourceRecord, SourceSystem};

/// An employee as recorded in the HR roster.
///
/// Immutable once loaded for a run.
///
/// # Examples
///
/// ```
/// use payroll_audit::models::EmployeeRecord;
/// use rust_decimal::Decimal;
///
/// let record = EmployeeRecord {
///     employee_id: "E1001".to_string(),
///     pay: Some(Decimal::new(520000, 2)),
///     position: Some("Associate Professor".to_string()),
///     department: Some("Computer Science".to_string()),
///     employment_status: Some("Active".to_string()),
///     pay_period_end: None,
///     line: 2,
/// };
/// assert_eq!(record.department.as_deref(), Some("Computer Science"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// The pay amount recorded by HR.
    pub pay: Option<Decimal>,
    /// The job position.
    pub position: Option<String>,
    /// The department.
    pub department: Option<String>,
    /// The employment status (e.g. "Active", "On Leave").
    pub employment_status: Option<String>,
    /// The end date of the pay period.
    pub pay_period_end: Option<NaiveDate>,
    /// The 1-based line in the HR file.
    #[serde(default)]
    pub line: u64,
}

impl SourceRecord for EmployeeRecord {
    const SYSTEM: SourceSystem = SourceSystem::Hr;

    fn from_fields(fields: RecordFields) -> Self {
        Self {
            employee_id: fields.employee_id,
            pay: fields.pay,
            position: fields.position,
            department: fields.department,
            employment_status: fields.status,
            pay_period_end: fields.pay_period_end,
            line: fields.line,
        }
    }

    fn employee_id(&self) -> &str {
        &self.employee_id
    }

    fn pay(&self) -> Option<Decimal> {
        self.pay
    }

    fn line(&self) -> u64 {
        self.line
    }
}
