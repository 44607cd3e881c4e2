//! Payroll-side ledger record.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{RecordFields, SourceRecord, SourceSystem};

/// An employee as recorded in the Payroll ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Identifier in the same key space as HR.
    pub employee_id: String,
    /// The pay amount recorded by Payroll.
    pub pay: Option<Decimal>,
    /// The job position.
    pub position: Option<String>,
    /// The department.
    pub department: Option<String>,
    /// The payroll status (e.g. "Processed", "Pending").
    pub payroll_status: Option<String>,
    /// The end date of the pay period.
    pub pay_period_end: Option<NaiveDate>,
    /// The 1-based line in the Payroll file.
    #[serde(default)]
    pub line: u64,
}

impl SourceRecord for PayrollRecord {
    const SYSTEM: SourceSystem = SourceSystem::Payroll;

    fn from_fields(fields: RecordFields) -> Self {
        Self {
            employee_id: fields.employee_id,
            pay: fields.pay,
            position: fields.position,
            department: fields.department,
            payroll_status: fields.status,
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
