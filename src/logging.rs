//! Tracing subscriber setup for the binary.
//!
//! Library code only emits `tracing` events; the entry point calls [`init`]
//! once to decide where they go.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;
use crate::error::{AuditError, AuditResult};

fn logging_error(message: impl ToString) -> AuditError {
    AuditError::Logging {
        message: message.to_string(),
    }
}

/// Filter from `RUST_LOG`, falling back to the configured level.
pub fn build_filter(level: &str) -> AuditResult<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| logging_error(format!("invalid log level '{}': {}", level, e)))
}

/// Opens the log file for appending, creating parent directories.
pub fn open_log_file(path: &Path) -> AuditResult<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| logging_error(format!("cannot create '{}': {}", parent.display(), e)))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| logging_error(format!("cannot open '{}': {}", path.display(), e)))
}

/// Installs the global subscriber: console output on stderr plus, when a
/// file is configured, a plain-text copy appended to it.
///
/// # Errors
///
/// Returns `Logging` if the level is invalid, the file cannot be opened, or
/// a subscriber is already installed.
pub fn init(config: &LoggingConfig) -> AuditResult<()> {
    let filter = build_filter(&config.level)?;

    let file_layer = match &config.file {
        Some(path) => Some(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(open_log_file(path)?)),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(logging_error)
}

/// Installs a console-only subscriber at the default level.
///
/// Used when the configuration could not be loaded, so that errors raised
/// before [`init`] are still logged.
///
/// # Errors
///
/// Returns `Logging` if a subscriber is already installed.
pub fn init_fallback() -> AuditResult<()> {
    let filter = build_filter(&LoggingConfig::default().level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init()
        .map_err(logging_error)
}
