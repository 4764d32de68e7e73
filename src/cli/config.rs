//! Configuration file structure
//!
//! ```json
//! {
//!   "db_path": "./db.csv",
//!   "server": { "host": "0.0.0.0", "port": 8000, "cors_origins": [] },
//!   "log": { "level": "info", "format": "text", "file": "actions.log" }
//! }
//! ```
//!
//! Every field is optional. `"file": null` turns the action log off.
//! Command-line flags override file values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::args::StoreArgs;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::observability::LogConfig;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// CSV store file (default: "./db.csv")
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub log: LogConfig,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./db.csv")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            server: HttpServerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolve the effective configuration for a command: the file named by
    /// `--config` (or defaults), then `--db-path`.
    pub fn resolve(args: &StoreArgs) -> CliResult<Self> {
        let mut config = match args.config {
            Some(ref path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(ref db_path) = args.db_path {
            config.db_path = db_path.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.db_path.as_os_str().is_empty() {
            return Err(CliError::config_error("db_path must not be empty"));
        }

        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be > 0"));
        }

        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("server.host must not be empty"));
        }

        self.log
            .configured_filter()
            .map_err(|e| CliError::config_error(e.to_string()))?;

        Ok(())
    }
}
