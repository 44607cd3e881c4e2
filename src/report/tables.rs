//! The named tables a report exposes, independent of file format.
//!
//! Sheet and column names here are the read contract for chart generation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DepartmentAggregate, JoinedRow, ReconciliationResult};

/// Sheet holding rows whose pay disagrees.
pub const MISMATCHED_RECORDS: &str = "Mismatched Records";
/// Sheet holding rows present only in Payroll.
pub const MISSING_IN_HR: &str = "Missing in HR";
/// Sheet holding rows present only in HR.
pub const MISSING_IN_PAYROLL: &str = "Missing in Payroll";
/// Sheet holding per-department totals.
pub const DEPARTMENT_ANALYSIS: &str = "Department Analysis";

/// Every sheet of the workbook, in workbook order.
pub const SHEET_NAMES: [&str; 4] = [
    MISMATCHED_RECORDS,
    MISSING_IN_HR,
    MISSING_IN_PAYROLL,
    DEPARTMENT_ANALYSIS,
];

/// Columns of the row-level sheets.
pub const JOINED_COLUMNS: [&str; 11] = [
    "EmployeeID",
    "Pay_HR",
    "Position_HR",
    "Department_HR",
    "EmploymentStatus",
    "PayPeriodEnd_HR",
    "Pay_Payroll",
    "Position_Payroll",
    "Department_Payroll",
    "PayrollStatus",
    "PayPeriodEnd_Payroll",
];

/// Columns of the department sheet. `EmployeeID` holds the row count and
/// the pay columns hold sums.
pub const DEPARTMENT_COLUMNS: [&str; 5] = [
    "Department_HR",
    "EmployeeID",
    "Pay_HR",
    "Pay_Payroll",
    "Discrepancy",
];

/// A typed table cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Cell {
    /// No value.
    Empty,
    /// Free text.
    Text(String),
    /// A money amount.
    Amount(Decimal),
    /// A row count.
    Count(usize),
    /// A calendar date.
    Date(NaiveDate),
}

impl Cell {
    fn text(value: Option<&str>) -> Self {
        value.map_or(Cell::Empty, |v| Cell::Text(v.to_string()))
    }

    fn amount(value: Option<Decimal>) -> Self {
        value.map_or(Cell::Empty, Cell::Amount)
    }

    fn date(value: Option<NaiveDate>) -> Self {
        value.map_or(Cell::Empty, Cell::Date)
    }

    /// The cell as an amount, when it holds a number.
    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            Cell::Amount(amount) => Some(*amount),
            Cell::Count(count) => Some(Decimal::from(*count)),
            _ => None,
        }
    }

    /// The cell as text, when it holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// A named table with a header row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    /// The sheet name.
    pub name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows, each as wide as `headers`.
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    /// Creates an empty table with the given name and headers.
    pub fn new(name: &str, headers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Index of a column by header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Cells of one joined row, in [`JOINED_COLUMNS`] order.
pub fn joined_row_cells(row: &JoinedRow) -> Vec<Cell> {
    let hr = row.hr();
    let payroll = row.payroll();

    vec![
        Cell::Text(row.employee_id().to_string()),
        Cell::amount(row.pay_hr()),
        Cell::text(hr.and_then(|r| r.position.as_deref())),
        Cell::text(hr.and_then(|r| r.department.as_deref())),
        Cell::text(hr.and_then(|r| r.employment_status.as_deref())),
        Cell::date(hr.and_then(|r| r.pay_period_end)),
        Cell::amount(row.pay_payroll()),
        Cell::text(payroll.and_then(|r| r.position.as_deref())),
        Cell::text(payroll.and_then(|r| r.department.as_deref())),
        Cell::text(payroll.and_then(|r| r.payroll_status.as_deref())),
        Cell::date(payroll.and_then(|r| r.pay_period_end)),
    ]
}

fn department_cells(aggregate: &DepartmentAggregate) -> Vec<Cell> {
    vec![
        Cell::Text(aggregate.department.clone()),
        Cell::Count(aggregate.employee_count),
        Cell::Amount(aggregate.pay_hr),
        Cell::Amount(aggregate.pay_payroll),
        Cell::Amount(aggregate.discrepancy),
    ]
}

fn row_table<'a>(name: &str, rows: impl Iterator<Item = &'a JoinedRow>) -> ReportTable {
    let mut table = ReportTable::new(name, &JOINED_COLUMNS);
    table.rows = rows.map(joined_row_cells).collect();
    table
}

/// Builds the four report tables, in [`SHEET_NAMES`] order.
pub fn build_tables(result: &ReconciliationResult) -> Vec<ReportTable> {
    let mut departments = ReportTable::new(DEPARTMENT_ANALYSIS, &DEPARTMENT_COLUMNS);
    departments.rows = result.departments.iter().map(department_cells).collect();

    vec![
        row_table(MISMATCHED_RECORDS, result.mismatches()),
        row_table(MISSING_IN_HR, result.missing_in_hr()),
        row_table(MISSING_IN_PAYROLL, result.missing_in_payroll()),
        departments,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeRecord, PayrollRecord};
    use crate::reconciliation::reconcile;

    fn hr(id: &str, pay: i64, dept: &str) -> EmployeeRecord {
        EmployeeRecord {
            employee_id: id.to_string(),
            pay: Some(Decimal::new(pay, 0)),
            position: Some("Professor".to_string()),
            department: Some(dept.to_string()),
            employment_status: Some("Active".to_string()),
            pay_period_end: NaiveDate::from_ymd_opt(2025, 1, 31),
            line: 2,
        }
    }

    fn payroll(id: &str, pay: i64) -> PayrollRecord {
        PayrollRecord {
            employee_id: id.to_string(),
            pay: Some(Decimal::new(pay, 0)),
            position: Some("Professor".to_string()),
            department: Some("Math".to_string()),
            payroll_status: Some("Processed".to_string()),
            pay_period_end: None,
            line: 2,
        }
    }

    #[test]
    fn test_tables_are_named_and_ordered() {
        let result = reconcile(&[hr("E2", 6000, "Math")], &[payroll("E2", 6100)]).unwrap();
        let tables = build_tables(&result);
        let names: Vec<&str> = tables.iter().map(|t| t.name.as_str()).collect();

        assert_eq!(names, SHEET_NAMES.to_vec());
        assert_eq!(tables[0].headers, JOINED_COLUMNS.to_vec());
        assert_eq!(tables[3].headers, DEPARTMENT_COLUMNS.to_vec());
    }

    #[test]
    fn test_mismatch_row_cells() {
        let result = reconcile(&[hr("E2", 6000, "Math")], &[payroll("E2", 6100)]).unwrap();
        let tables = build_tables(&result);
        let mismatches = &tables[0];

        assert_eq!(mismatches.rows.len(), 1);
        let row = &mismatches.rows[0];
        assert_eq!(row[0], Cell::Text("E2".to_string()));
        assert_eq!(row[1], Cell::Amount(Decimal::new(6000, 0)));
        assert_eq!(row[5], Cell::Date(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()));
        assert_eq!(row[6], Cell::Amount(Decimal::new(6100, 0)));
        assert_eq!(row[10], Cell::Empty);
    }

    #[test]
    fn test_missing_in_hr_row_has_empty_hr_cells() {
        let result = reconcile(&[], &[payroll("E4", 3000)]).unwrap();
        let tables = build_tables(&result);
        let missing = &tables[1];

        assert_eq!(missing.rows.len(), 1);
        assert_eq!(missing.rows[0][1], Cell::Empty);
        assert_eq!(missing.rows[0][3], Cell::Empty);
        assert_eq!(missing.rows[0][8], Cell::Text("Math".to_string()));
        assert!(tables[3].rows.is_empty());
    }

    #[test]
    fn test_department_table_cells() {
        let result = reconcile(&[hr("E3", 4000, "Art")], &[]).unwrap();
        let tables = build_tables(&result);
        let departments = &tables[3];

        assert_eq!(
            departments.rows[0],
            vec![
                Cell::Text("Art".to_string()),
                Cell::Count(1),
                Cell::Amount(Decimal::new(4000, 0)),
                Cell::Amount(Decimal::ZERO),
                Cell::Amount(Decimal::new(4000, 0)),
            ]
        );
    }

    #[test]
    fn test_column_lookup() {
        let table = ReportTable::new(DEPARTMENT_ANALYSIS, &DEPARTMENT_COLUMNS);
        assert_eq!(table.column("Discrepancy"), Some(4));
        assert_eq!(table.column("Nope"), None);
    }
}
