//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for reading an
//! [`AuditConfig`] from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{AuditError, AuditResult};

use super::types::AuditConfig;

/// Loads the audit configuration.
///
/// # File Format
///
/// ```yaml
/// hr_file: data/hr_system_data.csv
/// payroll_file: data/payroll_system_data.csv
/// output_dir: output
/// duplicate_policy: keep_last
/// loader:
///   delimiter: ","
///   date_formats: ["%Y-%m-%d", "%m/%d/%Y"]
/// logging:
///   level: info
///   file: payroll_audit.log
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AuditConfig,
}

impl ConfigLoader {
    /// Loads configuration from the given YAML file.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if the file cannot be read
    /// - `ConfigParse` if the file is not valid YAML for [`AuditConfig`]
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_audit::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/audit.yaml")?;
    /// println!("HR file: {}", loader.config().hr_file.display());
    /// # Ok::<(), payroll_audit::error::AuditError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> AuditResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| AuditError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content).map_err(|message| AuditError::ConfigParse {
            path: path_str,
            message,
        })?;

        Ok(Self { config })
    }

    /// Loads the file when a path is given, otherwise uses defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> AuditResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self {
                config: AuditConfig::default(),
            }),
        }
    }

    fn parse(content: &str) -> Result<AuditConfig, String> {
        // An empty document deserializes to unit, not to a defaulted struct.
        if content.trim().is_empty() {
            return Ok(AuditConfig::default());
        }
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AuditConfig {
        self.config
    }
}
