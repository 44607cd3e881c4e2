//! Per-department aggregation over the HR department field.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{AuditError, AuditResult};
use crate::models::{ClassifiedRow, DepartmentAggregate};

#[derive(Default)]
struct Totals {
    count: usize,
    pay_hr: Decimal,
    pay_payroll: Decimal,
}

fn add(total: Decimal, amount: Option<Decimal>, department: &str) -> AuditResult<Decimal> {
    total
        .checked_add(amount.unwrap_or(Decimal::ZERO))
        .ok_or_else(|| AuditError::Reconciliation {
            message: format!("pay total overflows for department '{}'", department),
        })
}

/// Groups rows by HR department and totals both sides.
///
/// Rows without an HR department (including every Payroll-only row) are
/// skipped. Absent pay contributes zero. The discrepancy is
/// `|sum(pay_HR) - sum(pay_Payroll)|`, so a department whose mismatches
/// offset each other reports zero.
///
/// Results are ordered by department name.
pub fn aggregate_departments(rows: &[ClassifiedRow]) -> AuditResult<Vec<DepartmentAggregate>> {
    let mut groups: BTreeMap<&str, Totals> = BTreeMap::new();

    for classified in rows {
        let row = &classified.row;
        let Some(department) = row.department_hr() else {
            continue;
        };

        let totals = groups.entry(department).or_default();
        totals.count += 1;
        totals.pay_hr = add(totals.pay_hr, row.pay_hr(), department)?;
        totals.pay_payroll = add(totals.pay_payroll, row.pay_payroll(), department)?;
    }

    groups
        .into_iter()
        .map(|(department, totals)| {
            let difference = totals
                .pay_hr
                .checked_sub(totals.pay_payroll)
                .ok_or_else(|| AuditError::Reconciliation {
                    message: format!("discrepancy overflows for department '{}'", department),
                })?;
            Ok(DepartmentAggregate {
                department: department.to_string(),
                employee_count: totals.count,
                pay_hr: totals.pay_hr,
                pay_payroll: totals.pay_payroll,
                discrepancy: difference.abs(),
            })
        })
        .collect()
}
