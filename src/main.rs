//! Command line entry point for the payroll audit.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::error;

use payroll_audit::auditor::PayrollAuditor;
use payroll_audit::charts::ChartGenerator;
use payroll_audit::config::{AuditConfig, ConfigLoader};
use payroll_audit::error::{AuditError, AuditResult};
use payroll_audit::insights::AuditInsights;
use payroll_audit::logging;
use payroll_audit::models::AuditStatistics;
use payroll_audit::report::{audit_timestamp, find_latest};

#[derive(Parser)]
#[command(name = "payroll-audit")]
#[command(about = "Reconcile an HR roster against a Payroll ledger")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load both sources, reconcile them and export the reports
    Run {
        /// YAML configuration file
        #[arg(long, env = "PAYROLL_AUDIT_CONFIG")]
        config: Option<PathBuf>,

        /// HR roster (overrides the configuration)
        #[arg(long)]
        hr: Option<PathBuf>,

        /// Payroll ledger (overrides the configuration)
        #[arg(long)]
        payroll: Option<PathBuf>,

        /// Output directory (overrides the configuration)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Render charts from the most recent reports
    Charts {
        /// YAML configuration file
        #[arg(long, env = "PAYROLL_AUDIT_CONFIG")]
        config: Option<PathBuf>,

        /// Directory holding the reports (overrides the configuration)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> AuditResult<AuditConfig> {
    ConfigLoader::load_or_default(path).map(ConfigLoader::into_config)
}

fn print_statistics(statistics: &AuditStatistics) {
    println!("Reconciliation Summary:");
    println!("Total records processed: {}", statistics.total_records);
    println!("Mismatched records: {}", statistics.mismatches);
    println!("Records in Payroll but missing in HR: {}", statistics.missing_in_hr);
    println!("Records in HR but missing in Payroll: {}", statistics.missing_in_payroll);
    println!(
        "Total discrepancy amount: ${:.2}",
        statistics.total_discrepancy_amount
    );
}

fn cmd_run(config: AuditConfig) -> AuditResult<bool> {
    let auditor = PayrollAuditor::new(config);
    let run = auditor.run()?;

    print_statistics(&run.result.statistics);
    for duplicate in &run.result.duplicates {
        println!(
            "Duplicate {} identifier {} on lines {:?}, kept line {}",
            duplicate.system, duplicate.employee_id, duplicate.lines, duplicate.kept_line
        );
    }

    println!();
    match &run.export.workbook {
        Ok(path) => println!("Excel report generated: {}", path.display()),
        Err(err) => eprintln!("Error: {}", err),
    }
    match &run.export.summary {
        Ok(path) => println!("JSON summary generated: {}", path.display()),
        Err(err) => eprintln!("Error: {}", err),
    }

    println!();
    print!("{}", AuditInsights::from_result(&run.result));

    Ok(run.export.is_complete())
}

fn cmd_charts(config: AuditConfig) -> AuditResult<bool> {
    let artifacts = match find_latest(&config.output_dir) {
        Ok(artifacts) => artifacts,
        Err(err @ AuditError::ArtifactsNotFound { .. }) => {
            println!("{}. Run `payroll-audit run` first.", err);
            return Ok(true);
        }
        Err(err) => return Err(err),
    };

    let generator = ChartGenerator::new(&config.output_dir, audit_timestamp(&Local::now()));
    let report = generator.generate_all(&artifacts);

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(path) => println!("Chart generated: {}", path.display()),
            Err(err) => println!("Chart not generated: {}", err),
        }
    }

    Ok(!report.all_failed())
}

/// Loads the configuration, applies command line overrides and starts logging.
///
/// On failure a console-only subscriber is installed so the error is still
/// logged.
fn prepare(
    config_path: Option<PathBuf>,
    apply_overrides: impl FnOnce(&mut AuditConfig),
) -> AuditResult<AuditConfig> {
    let prepared = load_config(config_path).and_then(|mut config| {
        apply_overrides(&mut config);
        logging::init(&config.logging)?;
        Ok(config)
    });

    if let Err(err) = &prepared {
        if let Err(fallback) = logging::init_fallback() {
            eprintln!("Error: {}", fallback);
            eprintln!("Error: {}", err);
        }
    }
    prepared
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            hr,
            payroll,
            output_dir,
        } => prepare(config, |config| {
            if let Some(hr) = hr {
                config.hr_file = hr;
            }
            if let Some(payroll) = payroll {
                config.payroll_file = payroll;
            }
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir;
            }
        })
        .and_then(cmd_run),
        Commands::Charts { config, output_dir } => prepare(config, |config| {
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir;
            }
        })
        .and_then(cmd_charts),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!(error = %err, "Audit failed");
            ExitCode::FAILURE
        }
    }
}
