//! XLSX workbook output and read-back.

use std::path::Path;

use calamine::{Data, Reader, Sheets, open_workbook_auto};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::{AuditError, AuditResult};

use super::tables::{Cell, ReportTable};

const ARTIFACT: &str = "workbook";
const COLUMN_WIDTH: f64 = 18.0;

fn export_error(message: impl ToString) -> AuditError {
    AuditError::Export {
        artifact: ARTIFACT.to_string(),
        message: message.to_string(),
    }
}

fn write_table(worksheet: &mut Worksheet, table: &ReportTable) -> Result<(), XlsxError> {
    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format("#,##0.00");

    for (col, header) in table.headers.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, header, &header_format)?;
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row32 = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col16 = col as u16;
            match cell {
                Cell::Empty => {}
                Cell::Text(text) => {
                    worksheet.write_string(row32, col16, text)?;
                }
                Cell::Amount(amount) => {
                    let value = amount.to_f64().unwrap_or_default();
                    worksheet.write_number_with_format(row32, col16, value, &amount_format)?;
                }
                Cell::Count(count) => {
                    worksheet.write_number(row32, col16, *count as f64)?;
                }
                Cell::Date(date) => {
                    worksheet.write_string(row32, col16, date.format("%Y-%m-%d").to_string())?;
                }
            }
        }
    }

    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// Writes each table to its own sheet and saves the workbook.
///
/// # Errors
///
/// Returns `Export` if a sheet cannot be created or the file cannot be saved.
pub fn write_workbook(tables: &[ReportTable], path: &Path) -> AuditResult<()> {
    let mut workbook = Workbook::new();

    for table in tables {
        let worksheet = workbook
            .add_worksheet()
            .set_name(&table.name)
            .map_err(|e| export_error(format!("failed to create sheet '{}': {}", table.name, e)))?;
        write_table(worksheet, table)
            .map_err(|e| export_error(format!("failed to write sheet '{}': {}", table.name, e)))?;
    }

    workbook
        .save(path)
        .map_err(|e| export_error(format!("failed to save '{}': {}", path.display(), e)))
}

fn read_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Decimal::from_f64(*n).map_or(Cell::Text(n.to_string()), Cell::Amount),
        Data::Int(n) => Cell::Amount(Decimal::from(*n)),
        other => Cell::Text(other.to_string()),
    }
}

/// Reads one named sheet back into a table.
///
/// The first row is taken as the header row. Numbers come back as
/// [`Cell::Amount`] and dates as text.
///
/// # Errors
///
/// Returns the message of the underlying failure if the file cannot be
/// opened or the sheet does not exist.
pub fn read_table(path: &Path, sheet: &str) -> Result<ReportTable, String> {
    let mut workbook: Sheets<_> =
        open_workbook_auto(path).map_err(|e| format!("failed to open '{}': {}", path.display(), e))?;

    let range = workbook
        .worksheet_range(sheet)
        .map_err(|e| format!("failed to read sheet '{}': {}", sheet, e))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header| header.iter().map(|cell| cell.to_string().trim().to_string()).collect())
        .unwrap_or_default();

    let rows = rows
        .map(|row| {
            let mut cells: Vec<Cell> = row.iter().map(read_cell).collect();
            cells.resize(headers.len(), Cell::Empty);
            cells
        })
        .collect();

    Ok(ReportTable {
        name: sheet.to_string(),
        headers,
        rows,
    })
}
