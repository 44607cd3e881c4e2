//! The full-outer-join row of one HR record and one Payroll record.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeRecord, PayrollRecord};

/// One row of the full outer join on employee identifier.
///
/// A row exists only because its identifier appeared in at least one source,
/// so the "neither side" case has no variant.
///
/// # Example
///
/// ```
/// use payroll_audit::models::{JoinedRow, PayrollRecord};
/// use rust_decimal::Decimal;
///
/// let row = JoinedRow::PayrollOnly(PayrollRecord {
///     employee_id: "E4".to_string(),
///     pay: Some(Decimal::new(3000, 0)),
///     position: None,
///     department: None,
///     payroll_status: Some("Processed".to_string()),
///     pay_period_end: None,
///     line: 5,
/// });
/// assert!(row.hr().is_none());
/// assert_eq!(row.employee_id(), "E4");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "presence", rename_all = "snake_case")]
pub enum JoinedRow {
    /// The identifier appears in both sources.
    Both {
        /// The HR side.
        hr: EmployeeRecord,
        /// The Payroll side.
        payroll: PayrollRecord,
    },
    /// The identifier appears only in HR.
    HrOnly(EmployeeRecord),
    /// The identifier appears only in Payroll.
    PayrollOnly(PayrollRecord),
}

impl JoinedRow {
    /// The join key shared by both sides.
    pub fn employee_id(&self) -> &str {
        match self {
            JoinedRow::Both { hr, .. } | JoinedRow::HrOnly(hr) => &hr.employee_id,
            JoinedRow::PayrollOnly(payroll) => &payroll.employee_id,
        }
    }

    /// The HR side, if present.
    pub fn hr(&self) -> Option<&EmployeeRecord> {
        match self {
            JoinedRow::Both { hr, .. } | JoinedRow::HrOnly(hr) => Some(hr),
            JoinedRow::PayrollOnly(_) => None,
        }
    }

    /// The Payroll side, if present.
    pub fn payroll(&self) -> Option<&PayrollRecord> {
        match self {
            JoinedRow::Both { payroll, .. } | JoinedRow::PayrollOnly(payroll) => Some(payroll),
            JoinedRow::HrOnly(_) => None,
        }
    }

    /// HR pay, absent when the HR side or its pay cell is missing.
    pub fn pay_hr(&self) -> Option<Decimal> {
        self.hr().and_then(|hr| hr.pay)
    }

    /// Payroll pay, absent when the Payroll side or its pay cell is missing.
    pub fn pay_payroll(&self) -> Option<Decimal> {
        self.payroll().and_then(|payroll| payroll.pay)
    }

    /// The HR department; the key for department aggregation.
    pub fn department_hr(&self) -> Option<&str> {
        self.hr().and_then(|hr| hr.department.as_deref())
    }

    /// The HR position; used for category breakdowns.
    pub fn position_hr(&self) -> Option<&str> {
        self.hr().and_then(|hr| hr.position.as_deref())
    }

    /// `|pay_HR - pay_Payroll|` when both amounts are present.
    pub fn pay_difference(&self) -> Option<Decimal> {
        match (self.pay_hr(), self.pay_payroll()) {
            (Some(hr), Some(payroll)) => hr.checked_sub(payroll).map(|diff| diff.abs()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hr(id: &str, pay: Option<&str>, dept: Option<&str>) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            pay: pay.map(dec),
            position: Some("Lecturer".to_string()),
            department: dept.map(str::to_string),
            employment_status: Some("Active".to_string()),
            pay_period_end: None,
            line: 2,
        }
    }

    fn payroll(id: &str, pay: Option<&str>) -> PayrollRecord {
        PayrollRecord {
            employee_id: id.to_string(),
            pay: pay.map(dec),
            position: None,
            department: Some("Math".to_string()),
            payroll_status: Some("Processed".to_string()),
            pay_period_end: None,
            line: 2,
        }
    }

    #[test]
    fn test_both_sides_exposes_both_pays() {
        let row = JoinedRow::Both {
            hr: hr("E2", Some("6000"), Some("Math")),
            payroll: payroll("E2", Some("6100")),
        };
        assert_eq!(row.pay_hr(), Some(dec("6000")));
        assert_eq!(row.pay_payroll(), Some(dec("6100")));
        assert_eq!(row.pay_difference(), Some(dec("100")));
    }

    #[test]
    fn test_hr_only_has_no_payroll_side() {
        let row = JoinedRow::HrOnly(hr("E3", Some("4000"), Some("Art")));
        assert!(row.payroll().is_none());
        assert_eq!(row.pay_payroll(), None);
        assert_eq!(row.pay_difference(), None);
        assert_eq!(row.department_hr(), Some("Art"));
    }

    #[test]
    fn test_payroll_only_has_no_hr_department() {
        let row = JoinedRow::PayrollOnly(payroll("E4", Some("3000")));
        assert_eq!(row.department_hr(), None);
        assert_eq!(row.employee_id(), "E4");
    }

    #[test]
    fn test_blank_pay_on_present_side_is_absent() {
        let row = JoinedRow::Both {
            hr: hr("E5", None, Some("CS")),
            payroll: payroll("E5", Some("100")),
        };
        assert_eq!(row.pay_hr(), None);
        assert_eq!(row.pay_difference(), None);
    }
}
