//! Full outer join of HR and Payroll records on employee identifier.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use tracing::warn;

use crate::config::DuplicatePolicy;
use crate::error::{AuditError, AuditResult};
use crate::models::{DuplicateResolution, EmployeeRecord, JoinedRow, PayrollRecord, SourceRecord};

/// The joined rows and any duplicates resolved while building them.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    /// One row per identifier, ordered by identifier.
    pub rows: Vec<JoinedRow>,
    /// Identifiers that occurred more than once within a source.
    pub duplicates: Vec<DuplicateResolution>,
}

/// Indexes one source by identifier, applying the duplicate policy.
///
/// Returns the index (ordered by identifier) and one [`DuplicateResolution`]
/// per duplicated identifier, ordered by identifier.
pub fn index_by_id<R: SourceRecord>(
    records: &[R],
    policy: DuplicatePolicy,
) -> AuditResult<(BTreeMap<String, R>, Vec<DuplicateResolution>)> {
    let mut index: BTreeMap<String, R> = BTreeMap::new();
    let mut occurrences: BTreeMap<String, Vec<u64>> = BTreeMap::new();

    for record in records {
        let id = record.employee_id();
        occurrences
            .entry(id.to_string())
            .or_default()
            .push(record.line());

        match index.entry(id.to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(record.clone());
            }
            Entry::Occupied(mut slot) => match policy {
                DuplicatePolicy::KeepLast => {
                    slot.insert(record.clone());
                }
                DuplicatePolicy::KeepFirst => {}
                DuplicatePolicy::Reject => {
                    return Err(AuditError::Reconciliation {
                        message: format!(
                            "duplicate EmployeeID '{}' in {} data (lines {} and {})",
                            id,
                            R::SYSTEM,
                            slot.get().line(),
                            record.line()
                        ),
                    });
                }
            },
        }
    }

    let duplicates = occurrences
        .into_iter()
        .filter(|(_, lines)| lines.len() > 1)
        .map(|(employee_id, lines)| {
            let kept_line = index.get(&employee_id).map_or(0, |record| record.line());
            warn!(
                system = %R::SYSTEM,
                employee_id = %employee_id,
                occurrences = lines.len(),
                kept_line,
                "Duplicate EmployeeID resolved"
            );
            DuplicateResolution {
                system: R::SYSTEM,
                employee_id,
                lines,
                kept_line,
            }
        })
        .collect();

    Ok((index, duplicates))
}

/// Joins the two sources, keeping every identifier present in either.
///
/// # Examples
///
/// ```
/// use payroll_audit::config::DuplicatePolicy;
/// use payroll_audit::models::{EmployeeRecord, JoinedRow, PayrollRecord};
/// use payroll_audit::reconciliation::full_outer_join;
///
/// let hr = vec![EmployeeRecord {
///     employee_id: "E3".to_string(),
///     pay: None,
///     position: None,
///     department: Some("Art".to_string()),
///     employment_status: None,
///     pay_period_end: None,
///     line: 2,
/// }];
/// let payroll: Vec<PayrollRecord> = vec![];
///
/// let outcome = full_outer_join(&hr, &payroll, DuplicatePolicy::KeepLast).unwrap();
/// assert!(matches!(outcome.rows[0], JoinedRow::HrOnly(_)));
/// ```
pub fn full_outer_join(
    hr_records: &[EmployeeRecord],
    payroll_records: &[PayrollRecord],
    policy: DuplicatePolicy,
) -> AuditResult<JoinOutcome> {
    let (hr_index, mut duplicates) = index_by_id(hr_records, policy)?;
    let (mut payroll_index, payroll_duplicates) = index_by_id(payroll_records, policy)?;
    duplicates.extend(payroll_duplicates);

    let mut keyed: BTreeMap<String, JoinedRow> = BTreeMap::new();

    for (id, hr) in hr_index {
        let row = match payroll_index.remove(&id) {
            Some(payroll) => JoinedRow::Both { hr, payroll },
            None => JoinedRow::HrOnly(hr),
        };
        keyed.insert(id, row);
    }

    for (id, payroll) in payroll_index {
        keyed.insert(id, JoinedRow::PayrollOnly(payroll));
    }

    Ok(JoinOutcome {
        rows: keyed.into_values().collect(),
        duplicates,
    })
}
