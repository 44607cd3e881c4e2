//! Configuration loading and management for the payroll audit.
//!
//! This module loads run settings (input paths, output directory, loader
//! options, duplicate policy, logging) from a YAML file. The pay tolerance
//! is not configurable.
//!
//! # Example
//!
//! ```no_run
//! use payroll_audit::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/audit.yaml").unwrap().into_config();
//! println!("Reports go to {}", config.output_dir.display());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AuditConfig, DEFAULT_DATE_FORMATS, DEFAULT_NA_VALUES, DuplicatePolicy, LoaderConfig, LoggingConfig};
