//! Chart datasets read from the exported report tables.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::AuditStatistics;
use crate::report::tables::{DEPARTMENT_ANALYSIS, MISMATCHED_RECORDS};
use crate::report::{Cell, ReportTable};

use super::category::EmployeeCategory;

/// Number of departments on the comparison chart.
pub const TOP_DEPARTMENTS: usize = 5;

/// HR and Payroll totals of one department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentComparison {
    /// The HR department value.
    pub department: String,
    /// Summed HR pay.
    pub pay_hr: Decimal,
    /// Summed Payroll pay.
    pub pay_payroll: Decimal,
    /// `|pay_hr - pay_payroll|` as exported.
    pub discrepancy: Decimal,
}

/// One slice of the issue distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueSlice {
    /// The bucket name.
    pub label: &'static str,
    /// Rows in the bucket.
    pub count: usize,
}

fn column(table: &ReportTable, name: &str) -> Result<usize, String> {
    table
        .column(name)
        .ok_or_else(|| format!("sheet '{}' has no column '{}'", table.name, name))
}

fn check_sheet(table: &ReportTable, expected: &str) -> Result<(), String> {
    if table.name == expected {
        Ok(())
    } else {
        Err(format!("expected sheet '{}', got '{}'", expected, table.name))
    }
}

fn cell(row: &[Cell], index: usize) -> &Cell {
    row.get(index).unwrap_or(&Cell::Empty)
}

/// Sums `|Pay_HR - Pay_Payroll|` of mismatched rows per category.
///
/// Rows lacking either amount are skipped. Categories with no rows are
/// omitted; the rest come back in [`EmployeeCategory::ALL`] order.
///
/// # Errors
///
/// Fails if a required column is absent or there is nothing to plot.
pub fn discrepancy_by_category(
    mismatches: &ReportTable,
) -> Result<Vec<(EmployeeCategory, Decimal)>, String> {
    check_sheet(mismatches, MISMATCHED_RECORDS)?;
    let position = column(mismatches, "Position_HR")?;
    let pay_hr = column(mismatches, "Pay_HR")?;
    let pay_payroll = column(mismatches, "Pay_Payroll")?;

    let mut totals: BTreeMap<EmployeeCategory, Decimal> = BTreeMap::new();
    for row in &mismatches.rows {
        let (Some(hr), Some(payroll)) = (cell(row, pay_hr).as_amount(), cell(row, pay_payroll).as_amount())
        else {
            continue;
        };
        let category = EmployeeCategory::from_position(cell(row, position).as_text());
        let total = totals.entry(category).or_default();
        *total = hr
            .checked_sub(payroll)
            .and_then(|difference| total.checked_add(difference.abs()))
            .ok_or_else(|| "discrepancy total overflowed".to_string())?;
    }

    if totals.is_empty() {
        return Err("no mismatched records to plot".to_string());
    }
    Ok(totals.into_iter().collect())
}

/// The departments with the largest discrepancy, largest first.
///
/// Ties keep sheet order.
///
/// # Errors
///
/// Fails if a required column is absent or the sheet has no rows.
pub fn top_departments(
    departments: &ReportTable,
    limit: usize,
) -> Result<Vec<DepartmentComparison>, String> {
    check_sheet(departments, DEPARTMENT_ANALYSIS)?;
    let name = column(departments, "Department_HR")?;
    let pay_hr = column(departments, "Pay_HR")?;
    let pay_payroll = column(departments, "Pay_Payroll")?;
    let discrepancy = column(departments, "Discrepancy")?;

    let mut comparisons: Vec<DepartmentComparison> = departments
        .rows
        .iter()
        .filter_map(|row| {
            Some(DepartmentComparison {
                department: cell(row, name).as_text()?.to_string(),
                pay_hr: cell(row, pay_hr).as_amount().unwrap_or_default(),
                pay_payroll: cell(row, pay_payroll).as_amount().unwrap_or_default(),
                discrepancy: cell(row, discrepancy).as_amount().unwrap_or_default(),
            })
        })
        .collect();

    if comparisons.is_empty() {
        return Err("no departments to plot".to_string());
    }

    // sort_by is stable, so equal discrepancies keep sheet order
    comparisons.sort_by(|a, b| b.discrepancy.cmp(&a.discrepancy));
    comparisons.truncate(limit);
    Ok(comparisons)
}

/// The three issue buckets with a non-zero count.
///
/// # Errors
///
/// Fails when every bucket is empty.
pub fn issue_distribution(statistics: &AuditStatistics) -> Result<Vec<IssueSlice>, String> {
    let slices: Vec<IssueSlice> = [
        ("Mismatched Records", statistics.mismatches),
        ("Missing in HR", statistics.missing_in_hr),
        ("Missing in Payroll", statistics.missing_in_payroll),
    ]
    .into_iter()
    .filter(|(_, count)| *count > 0)
    .map(|(label, count)| IssueSlice { label, count })
    .collect();

    if slices.is_empty() {
        return Err("no issues to plot".to_string());
    }
    Ok(slices)
}
