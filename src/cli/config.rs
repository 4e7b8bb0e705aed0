//! Optional JSON configuration
//!
//! Every field has a default, so an empty object `{}` is a valid file and
//! running without `--config` uses the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogLayout;
use crate::observability::Severity;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Schema file name inside the database directory
    #[serde(default = "default_schema_file")]
    pub schema_file: String,

    /// Directory holding relation files, relative to the database directory
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Relation file extension, without the dot
    #[serde(default = "default_data_extension")]
    pub data_extension: String,

    /// Minimum log severity (TRACE, INFO, WARN, ERROR, FATAL)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_file() -> String {
    "schema.txt".to_string()
}
fn default_data_dir() -> String {
    "files".to_string()
}
fn default_data_extension() -> String {
    "csv".to_string()
}
fn default_log_level() -> String {
    "WARN".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_file: default_schema_file(),
            data_dir: default_data_dir(),
            data_extension: default_data_extension(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise returns the defaults
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> CliResult<()> {
        for (name, value) in [
            ("schema_file", &self.schema_file),
            ("data_dir", &self.data_dir),
            ("data_extension", &self.data_extension),
        ] {
            if value.trim().is_empty() {
                return Err(CliError::config(format!("{} must not be empty", name)));
            }
        }

        if self.data_extension.contains(['.', '/', '\\']) {
            return Err(CliError::config(format!(
                "Invalid data_extension: '{}'. Give the bare extension, e.g. 'csv'.",
                self.data_extension
            )));
        }

        self.severity()?;
        Ok(())
    }

    /// Parsed `log_level`
    pub fn severity(&self) -> CliResult<Severity> {
        self.log_level.parse::<Severity>().map_err(|bad| {
            CliError::config(format!(
                "Invalid log_level: '{}'. Expected TRACE, INFO, WARN, ERROR or FATAL.",
                bad
            ))
        })
    }

    /// Database directory layout passed to the catalog
    pub fn layout(&self) -> CatalogLayout {
        CatalogLayout {
            schema_file: self.schema_file.clone(),
            data_dir: self.data_dir.clone(),
            data_extension: self.data_extension.clone(),
        }
    }
}
