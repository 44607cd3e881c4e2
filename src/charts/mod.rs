//! Chart generation from exported report artifacts.
//!
//! Charts read the workbook and summary back from disk strictly by sheet and
//! column name, so they work on any run's artifacts. Each chart is rendered
//! and written independently.

mod category;
pub mod data;
pub mod svg;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::prelude::ToPrimitive;
use tracing::{Span, error, info, warn};

use crate::error::{AuditError, AuditResult};
use crate::report::artifacts::{ReportArtifacts, chart_path};
use crate::report::tables::{DEPARTMENT_ANALYSIS, MISMATCHED_RECORDS};
use crate::report::{AuditSummary, read_table};

pub use category::EmployeeCategory;
pub use data::{DepartmentComparison, IssueSlice, TOP_DEPARTMENTS};

use svg::{Datum, Series};

/// The charts a chart run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    /// Summed mismatch discrepancy per employee category.
    DiscrepancyByCategory,
    /// HR vs Payroll totals for the top departments.
    DepartmentComparison,
    /// Share of each issue bucket.
    IssuesDistribution,
}

impl ChartKind {
    /// Every chart, in generation order.
    pub const ALL: [ChartKind; 3] = [
        ChartKind::DiscrepancyByCategory,
        ChartKind::DepartmentComparison,
        ChartKind::IssuesDistribution,
    ];

    /// File name stem, before the timestamp.
    pub fn file_stem(self) -> &'static str {
        match self {
            ChartKind::DiscrepancyByCategory => "discrepancy_by_category",
            ChartKind::DepartmentComparison => "department_comparison",
            ChartKind::IssuesDistribution => "issues_distribution",
        }
    }

    /// Chart title.
    pub fn title(self) -> &'static str {
        match self {
            ChartKind::DiscrepancyByCategory => "Total Pay Discrepancies by Employee Category",
            ChartKind::DepartmentComparison => {
                "HR vs Payroll System Totals by Department (Top 5 Discrepancies)"
            }
            ChartKind::IssuesDistribution => "Distribution of Issues in Payroll Audit",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_stem().replace('_', " "))
    }
}

/// Outcome of one chart.
#[derive(Debug)]
pub struct ChartOutcome {
    /// The chart attempted.
    pub kind: ChartKind,
    /// The written file, or why the chart failed.
    pub result: AuditResult<PathBuf>,
}

/// Outcomes of every chart of a run, in [`ChartKind::ALL`] order.
#[derive(Debug, Default)]
pub struct ChartReport {
    /// One outcome per chart.
    pub outcomes: Vec<ChartOutcome>,
}

impl ChartReport {
    /// Paths of the charts that were written.
    pub fn written(&self) -> Vec<&Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(PathBuf::as_path))
            .collect()
    }

    /// Number of charts written.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Returns true when no chart could be written.
    pub fn all_failed(&self) -> bool {
        self.succeeded() == 0
    }
}

fn to_f64(value: rust_decimal::Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Renders charts from report artifacts into an output directory.
#[derive(Debug, Clone)]
pub struct ChartGenerator {
    output_dir: PathBuf,
    timestamp: String,
    span: Span,
}

impl ChartGenerator {
    /// Creates a generator naming its charts with `timestamp`.
    pub fn new(output_dir: impl Into<PathBuf>, timestamp: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            timestamp: timestamp.into(),
            span: Span::current(),
        }
    }

    /// Logs inside the given span instead of the caller's current one.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Renders one chart to SVG text.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure when the artifacts cannot be read
    /// or hold nothing to plot.
    pub fn render(&self, kind: ChartKind, artifacts: &ReportArtifacts) -> Result<String, String> {
        match kind {
            ChartKind::DiscrepancyByCategory => {
                let table = read_table(&artifacts.workbook, MISMATCHED_RECORDS)?;
                let data: Vec<Datum> = data::discrepancy_by_category(&table)?
                    .into_iter()
                    .map(|(category, amount)| Datum::new(category.label(), to_f64(amount)))
                    .collect();
                Ok(svg::bar_chart(
                    kind.title(),
                    "Employee Category",
                    "Total Discrepancy Amount ($)",
                    &data,
                ))
            }
            ChartKind::DepartmentComparison => {
                let table = read_table(&artifacts.workbook, DEPARTMENT_ANALYSIS)?;
                let top = data::top_departments(&table, TOP_DEPARTMENTS)?;
                let categories: Vec<String> = top.iter().map(|d| d.department.clone()).collect();
                let series = [
                    Series {
                        name: "HR".to_string(),
                        values: top.iter().map(|d| to_f64(d.pay_hr)).collect(),
                    },
                    Series {
                        name: "Payroll".to_string(),
                        values: top.iter().map(|d| to_f64(d.pay_payroll)).collect(),
                    },
                ];
                Ok(svg::grouped_bar_chart(
                    kind.title(),
                    "Department",
                    "Total Pay Amount ($)",
                    &categories,
                    &series,
                ))
            }
            ChartKind::IssuesDistribution => {
                let json = fs::read_to_string(&artifacts.summary).map_err(|e| {
                    format!("failed to read '{}': {}", artifacts.summary.display(), e)
                })?;
                let summary = AuditSummary::from_json(&json).map_err(|e| {
                    format!("invalid summary '{}': {}", artifacts.summary.display(), e)
                })?;
                let data: Vec<Datum> = data::issue_distribution(&summary.statistics)?
                    .into_iter()
                    .map(|slice| Datum::new(slice.label, slice.count as f64))
                    .collect();
                Ok(svg::pie_chart(kind.title(), &data))
            }
        }
    }

    /// Renders and writes one chart.
    ///
    /// # Errors
    ///
    /// Returns `Chart` naming the chart on any failure.
    pub fn generate_chart(
        &self,
        kind: ChartKind,
        artifacts: &ReportArtifacts,
    ) -> AuditResult<PathBuf> {
        let chart_error = |message: String| AuditError::Chart {
            chart: kind.to_string(),
            message,
        };

        let svg = self.render(kind, artifacts).map_err(chart_error)?;

        fs::create_dir_all(&self.output_dir).map_err(|e| {
            chart_error(format!(
                "cannot create output directory '{}': {}",
                self.output_dir.display(),
                e
            ))
        })?;
        let path = chart_path(&self.output_dir, kind.file_stem(), &self.timestamp);
        fs::write(&path, svg)
            .map_err(|e| chart_error(format!("failed to write '{}': {}", path.display(), e)))?;
        Ok(path)
    }

    /// Generates every chart. A failing chart does not stop the others.
    pub fn generate_all(&self, artifacts: &ReportArtifacts) -> ChartReport {
        let _entered = self.span.enter();
        info!(
            workbook = %artifacts.workbook.display(),
            summary = %artifacts.summary.display(),
            "Generating charts"
        );

        let outcomes: Vec<ChartOutcome> = ChartKind::ALL
            .into_iter()
            .map(|kind| {
                let result = self.generate_chart(kind, artifacts);
                match &result {
                    Ok(path) => info!(chart = %kind, path = %path.display(), "Chart written"),
                    Err(err) => error!(chart = %kind, error = %err, "Chart failed"),
                }
                ChartOutcome { kind, result }
            })
            .collect();

        let report = ChartReport { outcomes };
        if report.all_failed() {
            warn!("No charts could be generated");
        }
        report
    }
}
