//! Delimited-file parsing into typed source records.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::LoaderConfig;
use crate::error::{AuditError, AuditResult};
use crate::models::{RecordFields, SourceRecord, SourceSystem};

use super::dates::parse_date;

/// Columns every source must carry, in schema order.
pub const REQUIRED_COLUMNS: [&str; 5] = ["EmployeeID", "Pay", "Position", "Department", "PayPeriodEnd"];

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// The full required schema for a source, including its status column.
pub fn required_columns(system: SourceSystem) -> Vec<&'static str> {
    let mut columns = REQUIRED_COLUMNS.to_vec();
    columns.push(system.status_column());
    columns
}

/// Picks the candidate delimiter that splits the header line into the most fields.
///
/// Falls back to a comma when no candidate splits the header.
pub fn sniff_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or("");
    DELIMITER_CANDIDATES
        .iter()
        .map(|&candidate| {
            let count = header.bytes().filter(|&b| b == candidate).count();
            (candidate, count)
        })
        .filter(|&(_, count)| count > 0)
        // max_by_key returns the last maximum; reverse keeps candidate order on ties
        .rev()
        .max_by_key(|&(_, count)| count)
        .map(|(candidate, _)| candidate)
        .unwrap_or(b',')
}

struct ColumnIndex {
    employee_id: usize,
    pay: usize,
    position: usize,
    department: usize,
    status: usize,
    pay_period_end: usize,
}

impl ColumnIndex {
    fn resolve(system: SourceSystem, headers: &[String]) -> AuditResult<Self> {
        let positions: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();

        let missing: Vec<String> = required_columns(system)
            .into_iter()
            .filter(|column| !positions.contains_key(column))
            .map(str::to_string)
            .collect();

        if !missing.is_empty() {
            return Err(AuditError::SchemaValidation { system, missing });
        }

        let idx = |name: &str| positions[name];
        Ok(Self {
            employee_id: idx("EmployeeID"),
            pay: idx("Pay"),
            position: idx("Position"),
            department: idx("Department"),
            status: idx(system.status_column()),
            pay_period_end: idx("PayPeriodEnd"),
        })
    }
}

fn cell<'a>(record: &'a csv::StringRecord, index: usize, options: &LoaderConfig) -> Option<&'a str> {
    record
        .get(index)
        .map(str::trim)
        .filter(|v| !v.is_empty() && !options.is_na(v))
}

/// Plain or scientific decimal notation. Digit separators such as `_` are not
/// accepted.
fn parse_pay(value: &str) -> Option<Decimal> {
    if value.contains('_') {
        return None;
    }
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

/// Parses delimited text into records of type `R`.
///
/// Validates the header against the source schema before reading any row,
/// so a missing column is reported even for an empty file. Blank cells and
/// the configured absent markers become `None`.
pub fn parse_records<R: SourceRecord>(
    content: &str,
    delimiter: u8,
    options: &LoaderConfig,
) -> AuditResult<Vec<R>> {
    let system = R::SYSTEM;
    let content = content.trim_start_matches('\u{feff}');

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AuditError::InvalidField {
            system,
            line: 1,
            column: "<header>".to_string(),
            value: e.to_string(),
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let columns = ColumnIndex::resolve(system, &headers)?;

    let mut records = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let fallback_line = index as u64 + 2;
        let record = record.map_err(|e| AuditError::InvalidField {
            system,
            line: e.position().map_or(fallback_line, |p| p.line()),
            column: "<row>".to_string(),
            value: e.to_string(),
        })?;
        let line = record.position().map_or(fallback_line, |p| p.line());

        // Skip rows that are entirely blank.
        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        let employee_id = cell(&record, columns.employee_id, options)
            .ok_or_else(|| AuditError::InvalidField {
                system,
                line,
                column: "EmployeeID".to_string(),
                value: String::new(),
            })?
            .to_string();

        let pay = match cell(&record, columns.pay, options) {
            Some(raw) => Some(parse_pay(raw).ok_or_else(|| AuditError::InvalidField {
                system,
                line,
                column: "Pay".to_string(),
                value: raw.to_string(),
            })?),
            None => None,
        };

        let pay_period_end = match cell(&record, columns.pay_period_end, options) {
            Some(raw) => Some(parse_date(raw, &options.date_formats).ok_or_else(|| {
                AuditError::DateParse {
                    system,
                    line,
                    employee_id: employee_id.clone(),
                    value: raw.to_string(),
                }
            })?),
            None => None,
        };

        let owned = |index: usize| cell(&record, index, options).map(str::to_string);

        records.push(R::from_fields(RecordFields {
            employee_id,
            pay,
            position: owned(columns.position),
            department: owned(columns.department),
            status: owned(columns.status),
            pay_period_end,
            line,
        }));
    }

    debug!(system = %system, rows = records.len(), columns = headers.len(), "Parsed delimited source");

    Ok(records)
}
