//! Classification of joined rows into discrepancy buckets.

use rust_decimal::Decimal;

use crate::error::{AuditError, AuditResult};
use crate::models::{Classification, JoinedRow};

/// Largest pay difference still treated as agreement: one currency minor unit.
///
/// Fixed; it absorbs rounding in summed currency values and is not a
/// business allowance.
pub const PAY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Classifies one joined row.
///
/// Precedence:
/// 1. HR pay absent → [`Classification::MissingInHr`]
/// 2. Payroll pay absent → [`Classification::MissingInPayroll`]
/// 3. `|pay_HR - pay_Payroll| > 0.01` → [`Classification::Mismatch`]
/// 4. otherwise → [`Classification::Reconciled`]
///
/// # Examples
///
/// ```
/// use payroll_audit::models::{Classification, EmployeeRecord, JoinedRow, PayrollRecord};
/// use payroll_audit::reconciliation::classify;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hr = EmployeeRecord {
///     employee_id: "E1".to_string(),
///     pay: Some(Decimal::from_str("5000").unwrap()),
///     position: None,
///     department: Some("CS".to_string()),
///     employment_status: None,
///     pay_period_end: None,
///     line: 2,
/// };
/// let payroll = PayrollRecord {
///     employee_id: "E1".to_string(),
///     pay: Some(Decimal::from_str("5000.005").unwrap()),
///     position: None,
///     department: Some("CS".to_string()),
///     payroll_status: None,
///     pay_period_end: None,
///     line: 2,
/// };
///
/// let row = JoinedRow::Both { hr, payroll };
/// assert_eq!(classify(&row).unwrap(), Classification::Reconciled);
/// ```
pub fn classify(row: &JoinedRow) -> AuditResult<Classification> {
    let (pay_hr, pay_payroll) = match (row.pay_hr(), row.pay_payroll()) {
        (None, _) => return Ok(Classification::MissingInHr),
        (Some(_), None) => return Ok(Classification::MissingInPayroll),
        (Some(hr), Some(payroll)) => (hr, payroll),
    };

    let difference = pay_hr
        .checked_sub(pay_payroll)
        .ok_or_else(|| AuditError::Reconciliation {
            message: format!(
                "pay difference overflows for EmployeeID '{}' ({} - {})",
                row.employee_id(),
                pay_hr,
                pay_payroll
            ),
        })?
        .abs();

    Ok(if difference > PAY_TOLERANCE {
        Classification::Mismatch
    } else {
        Classification::Reconciled
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRecord, PayrollRecord};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn hr(pay: Option<&str>) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: "E1".to_string(),
            pay: pay.map(dec),
            position: None,
            department: None,
            employment_status: None,
            pay_period_end: None,
            line: 2,
        }
    }

    fn payroll(pay: Option<&str>) -> PayrollRecord {
        PayrollRecord {
            employee_id: "E1".to_string(),
            pay: pay.map(dec),
            position: None,
            department: None,
            payroll_status: None,
            pay_period_end: None,
            line: 2,
        }
    }

    fn both(hr_pay: &str, payroll_pay: &str) -> JoinedRow {
        JoinedRow::Both {
            hr: hr(Some(hr_pay)),
            payroll: payroll(Some(payroll_pay)),
        }
    }

    #[test]
    fn test_tolerance_is_one_cent() {
        assert_eq!(PAY_TOLERANCE, dec("0.01"));
    }

    #[test]
    fn test_half_cent_difference_is_reconciled() {
        assert_eq!(
            classify(&both("5000", "5000.005")).unwrap(),
            Classification::Reconciled
        );
    }

    #[test]
    fn test_difference_exactly_at_tolerance_is_reconciled() {
        assert_eq!(
            classify(&both("100.00", "100.01")).unwrap(),
            Classification::Reconciled
        );
    }

    #[test]
    fn test_difference_just_over_tolerance_is_mismatch() {
        assert_eq!(
            classify(&both("100.00", "100.011")).unwrap(),
            Classification::Mismatch
        );
    }

    #[test]
    fn test_hundred_difference_is_mismatch_either_direction() {
        assert_eq!(classify(&both("6000", "6100")).unwrap(), Classification::Mismatch);
        assert_eq!(classify(&both("6100", "6000")).unwrap(), Classification::Mismatch);
    }

    #[test]
    fn test_hr_only_is_missing_in_payroll() {
        let row = JoinedRow::HrOnly(hr(Some("4000")));
        assert_eq!(classify(&row).unwrap(), Classification::MissingInPayroll);
    }

    #[test]
    fn test_payroll_only_is_missing_in_hr() {
        let row = JoinedRow::PayrollOnly(payroll(Some("3000")));
        assert_eq!(classify(&row).unwrap(), Classification::MissingInHr);
    }

    #[test]
    fn test_blank_pay_counts_as_absent_side() {
        let hr_blank = JoinedRow::Both {
            hr: hr(None),
            payroll: payroll(Some("10")),
        };
        let payroll_blank = JoinedRow::Both {
            hr: hr(Some("10")),
            payroll: payroll(None),
        };
        let both_blank = JoinedRow::Both {
            hr: hr(None),
            payroll: payroll(None),
        };

        assert_eq!(classify(&hr_blank).unwrap(), Classification::MissingInHr);
        assert_eq!(classify(&payroll_blank).unwrap(), Classification::MissingInPayroll);
        assert_eq!(classify(&both_blank).unwrap(), Classification::MissingInHr);
    }

    #[test]
    fn test_overflowing_difference_is_reconciliation_error() {
        let row = JoinedRow::Both {
            hr: hr(Some(Decimal::MAX.to_string().as_str())),
            payroll: payroll(Some(Decimal::MIN.to_string().as_str())),
        };
        assert!(matches!(
            classify(&row),
            Err(AuditError::Reconciliation { .. })
        ));
    }
}
