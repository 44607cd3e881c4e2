//! Orchestration of one audit run.
//!
//! [`PayrollAuditor`] wires the loader, the reconciliation engine and the
//! report exporter together under one run id and audit timestamp.

use chrono::Local;
use tracing::{Span, error, info, info_span};
use uuid::Uuid;

use crate::config::AuditConfig;
use crate::error::AuditResult;
use crate::loader::RecordLoader;
use crate::models::{EmployeeRecord, PayrollRecord, ReconciliationResult};
use crate::reconciliation::Reconciler;
use crate::report::{ExportOutcome, ReportExporter, audit_timestamp};

/// Identity of one run, shared by every component it drives.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Unique id of the run.
    pub run_id: Uuid,
    /// `%Y%m%d_%H%M%S` local time of the run.
    pub audit_timestamp: String,
    /// Span carrying the run id and timestamp.
    pub span: Span,
}

impl RunContext {
    /// Starts a run now.
    pub fn new() -> Self {
        Self::with_timestamp(audit_timestamp(&Local::now()))
    }

    /// Starts a run with a fixed audit timestamp.
    pub fn with_timestamp(audit_timestamp: impl Into<String>) -> Self {
        let run_id = Uuid::new_v4();
        let audit_timestamp = audit_timestamp.into();
        let span = info_span!("audit_run", run_id = %run_id, audit_date = %audit_timestamp);
        Self {
            run_id,
            audit_timestamp,
            span,
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Both sources, loaded and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSources {
    /// HR roster records in file order.
    pub hr: Vec<EmployeeRecord>,
    /// Payroll ledger records in file order.
    pub payroll: Vec<PayrollRecord>,
}

/// Everything one run produced.
#[derive(Debug)]
pub struct AuditRun {
    /// The reconciliation result.
    pub result: ReconciliationResult,
    /// Outcome of each report artifact.
    pub export: ExportOutcome,
}

/// Runs the audit for one configuration.
#[derive(Debug)]
pub struct PayrollAuditor {
    config: AuditConfig,
    context: RunContext,
    loader: RecordLoader,
    reconciler: Reconciler,
    exporter: ReportExporter,
}

impl PayrollAuditor {
    /// Creates an auditor for a run starting now.
    pub fn new(config: AuditConfig) -> Self {
        Self::with_context(config, RunContext::new())
    }

    /// Creates an auditor for the given run.
    pub fn with_context(config: AuditConfig, context: RunContext) -> Self {
        let loader = RecordLoader::new(config.loader.clone()).with_span(context.span.clone());
        let reconciler =
            Reconciler::new(config.duplicate_policy).with_span(context.span.clone());
        let exporter = ReportExporter::new(&config.output_dir, &context.audit_timestamp)
            .with_span(context.span.clone());

        Self {
            config,
            context,
            loader,
            reconciler,
            exporter,
        }
    }

    /// The run's identity.
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// The configuration in use.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Loads and validates both sources.
    ///
    /// # Errors
    ///
    /// Returns the first loader error; the HR source is read first.
    pub fn load_and_validate(&self) -> AuditResult<LoadedSources> {
        let hr = self.loader.load_hr(&self.config.hr_file)?;
        let payroll = self.loader.load_payroll(&self.config.payroll_file)?;
        Ok(LoadedSources { hr, payroll })
    }

    /// Reconciles loaded sources.
    ///
    /// # Errors
    ///
    /// Returns `Reconciliation` on a rejected duplicate or overflow.
    pub fn reconcile(&self, sources: &LoadedSources) -> AuditResult<ReconciliationResult> {
        self.reconciler.reconcile(&sources.hr, &sources.payroll)
    }

    /// Writes the workbook and the summary.
    pub fn generate_reports(&self, result: &ReconciliationResult) -> ExportOutcome {
        self.exporter.export_all(result)
    }

    /// Loads, reconciles and exports.
    ///
    /// # Errors
    ///
    /// Returns any loader or engine error. Export failures are reported in
    /// [`AuditRun::export`] instead.
    pub fn run(&self) -> AuditResult<AuditRun> {
        let outcome = self
            .load_and_validate()
            .and_then(|sources| self.reconcile(&sources));

        let result = self.context.span.in_scope(|| match outcome {
            Ok(result) => {
                info!(
                    total_records = result.statistics.total_records,
                    issues = result.statistics.total_issues(),
                    "Reconciliation complete"
                );
                Ok(result)
            }
            Err(err) => {
                error!(error = %err, "Audit run failed");
                Err(err)
            }
        })?;

        let export = self.generate_reports(&result);
        Ok(AuditRun { result, export })
    }
}
