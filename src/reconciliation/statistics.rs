//! Run statistics over classified rows.

use rust_decimal::Decimal;

use crate::error::{AuditError, AuditResult};
use crate::models::{AuditStatistics, Classification, ClassifiedRow};

/// Counts each bucket and totals the per-row mismatch amounts.
///
/// `total_discrepancy_amount` sums `|pay_HR - pay_Payroll|` row by row over
/// mismatches only, unlike the department discrepancy which differences
/// the sums.
pub fn compute_statistics(rows: &[ClassifiedRow]) -> AuditResult<AuditStatistics> {
    let mut statistics = AuditStatistics {
        total_records: rows.len(),
        mismatches: 0,
        missing_in_hr: 0,
        missing_in_payroll: 0,
        total_discrepancy_amount: Decimal::ZERO,
    };

    for classified in rows {
        match classified.classification {
            Classification::Mismatch => {
                statistics.mismatches += 1;
                let difference = classified.row.pay_difference().ok_or_else(|| {
                    AuditError::Reconciliation {
                        message: format!(
                            "mismatch for EmployeeID '{}' has no pay difference",
                            classified.row.employee_id()
                        ),
                    }
                })?;
                statistics.total_discrepancy_amount = statistics
                    .total_discrepancy_amount
                    .checked_add(difference)
                    .ok_or_else(|| AuditError::Reconciliation {
                        message: "total discrepancy amount overflows".to_string(),
                    })?;
            }
            Classification::MissingInHr => statistics.missing_in_hr += 1,
            Classification::MissingInPayroll => statistics.missing_in_payroll += 1,
            Classification::Reconciled => {}
        }
    }

    Ok(statistics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRecord, JoinedRow, PayrollRecord};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn both(id: &str, hr_pay: &str, payroll_pay: &str, classification: Classification) -> ClassifiedRow {
        ClassifiedRow {
            row: JoinedRow::Both {
                hr: EmployeeRecord {
                    employee_id: id.to_string(),
                    pay: Some(dec(hr_pay)),
                    position: None,
                    department: Some("CS".to_string()),
                    employment_status: None,
                    pay_period_end: None,
                    line: 2,
                },
                payroll: PayrollRecord {
                    employee_id: id.to_string(),
                    pay: Some(dec(payroll_pay)),
                    position: None,
                    department: Some("CS".to_string()),
                    payroll_status: None,
                    pay_period_end: None,
                    line: 2,
                },
            },
            classification,
        }
    }

    #[test]
    fn test_offsetting_mismatches_sum_per_row() {
        let rows = vec![
            both("E1", "1000", "1050", Classification::Mismatch),
            both("E2", "2000", "1950", Classification::Mismatch),
        ];

        let stats = compute_statistics(&rows).unwrap();
        assert_eq!(stats.mismatches, 2);
        assert_eq!(stats.total_discrepancy_amount, dec("100"));
    }

    #[test]
    fn test_reconciled_rows_count_only_in_total() {
        let rows = vec![
            both("E1", "5000", "5000.005", Classification::Reconciled),
            both("E2", "6000", "6100", Classification::Mismatch),
        ];

        let stats = compute_statistics(&rows).unwrap();
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.total_discrepancy_amount, dec("100"));
        assert_eq!(stats.reconciled(), 1);
    }

    #[test]
    fn test_empty_rows() {
        let stats = compute_statistics(&[]).unwrap();
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.total_discrepancy_amount, Decimal::ZERO);
    }
}
