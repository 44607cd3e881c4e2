//! The reconciliation engine.

use tracing::{Span, debug, info};

use crate::config::DuplicatePolicy;
use crate::error::AuditResult;
use crate::models::{
    Classification, ClassifiedRow, EmployeeRecord, PayrollRecord, ReconciliationResult,
};

use super::classify::classify;
use super::department::aggregate_departments;
use super::join::full_outer_join;
use super::statistics::compute_statistics;

/// Joins, classifies and aggregates one pair of sources.
///
/// Holds no state between runs; each call to [`Reconciler::reconcile`]
/// builds a fresh result from its inputs.
#[derive(Debug, Clone)]
pub struct Reconciler {
    duplicate_policy: DuplicatePolicy,
    span: Span,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(DuplicatePolicy::default())
    }
}

impl Reconciler {
    /// Creates an engine with the given duplicate identifier policy.
    pub fn new(duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            duplicate_policy,
            span: Span::current(),
        }
    }

    /// Logs inside the given span instead of the caller's current one.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Reconciles HR records against Payroll records.
    ///
    /// # Errors
    ///
    /// Returns `Reconciliation` if a duplicate is rejected by the policy or a
    /// decimal sum overflows. No partial result is returned.
    pub fn reconcile(
        &self,
        hr_records: &[EmployeeRecord],
        payroll_records: &[PayrollRecord],
    ) -> AuditResult<ReconciliationResult> {
        let _entered = self.span.enter();

        let joined = full_outer_join(hr_records, payroll_records, self.duplicate_policy)?;

        let rows = joined
            .rows
            .into_iter()
            .map(|row| {
                let classification = classify(&row)?;
                if classification == Classification::Mismatch {
                    debug!(
                        employee_id = %row.employee_id(),
                        pay_hr = ?row.pay_hr(),
                        pay_payroll = ?row.pay_payroll(),
                        "Pay mismatch"
                    );
                }
                Ok(ClassifiedRow {
                    row,
                    classification,
                })
            })
            .collect::<AuditResult<Vec<_>>>()?;

        let departments = aggregate_departments(&rows)?;
        let statistics = compute_statistics(&rows)?;

        info!(
            total_records = statistics.total_records,
            mismatches = statistics.mismatches,
            missing_in_hr = statistics.missing_in_hr,
            missing_in_payroll = statistics.missing_in_payroll,
            total_discrepancy_amount = %statistics.total_discrepancy_amount,
            departments = departments.len(),
            duplicates = joined.duplicates.len(),
            "Reconciliation completed successfully"
        );

        Ok(ReconciliationResult {
            rows,
            departments,
            statistics,
            duplicates: joined.duplicates,
        })
    }
}

/// Reconciles with the default engine (`keep_last` duplicates).
///
/// # Example
///
/// ```
/// use payroll_audit::models::{Classification, EmployeeRecord, PayrollRecord};
/// use payroll_audit::reconciliation::reconcile;
/// use rust_decimal::Decimal;
///
/// let hr = vec![EmployeeRecord {
///     employee_id: "E2".to_string(),
///     pay: Some(Decimal::new(6000, 0)),
///     position: Some("Professor".to_string()),
///     department: Some("Math".to_string()),
///     employment_status: Some("Active".to_string()),
///     pay_period_end: None,
///     line: 2,
/// }];
/// let payroll = vec![PayrollRecord {
///     employee_id: "E2".to_string(),
///     pay: Some(Decimal::new(6100, 0)),
///     position: Some("Professor".to_string()),
///     department: Some("Math".to_string()),
///     payroll_status: Some("Processed".to_string()),
///     pay_period_end: None,
///     line: 2,
/// }];
///
/// let result = reconcile(&hr, &payroll).unwrap();
/// assert_eq!(result.classification_of("E2"), Some(Classification::Mismatch));
/// assert_eq!(result.statistics.total_discrepancy_amount, Decimal::new(100, 0));
/// ```
pub fn reconcile(
    hr_records: &[EmployeeRecord],
    payroll_records: &[PayrollRecord],
) -> AuditResult<ReconciliationResult> {
    Reconciler::default().reconcile(hr_records, payroll_records)
}
