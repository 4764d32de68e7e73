//! Tracing subscriber setup
//!
//! - Plain text (`text`) or JSON lines on stderr
//! - JSON action log file (`actions.log` unless configured otherwise),
//!   appended to across restarts
//! - `RUST_LOG` overrides the configured level

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::{ObservabilityError, ObservabilityResult};

/// Output format for stderr logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human-readable events
    #[default]
    #[serde(alias = "pretty")]
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive (default: "info")
    #[serde(default = "default_level")]
    pub level: String,

    /// Stderr format (default: text)
    #[serde(default)]
    pub format: LogFormat,

    /// Action log file, always JSON (default: "actions.log"; `null`
    /// disables it)
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("actions.log"))
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            file: default_log_file(),
        }
    }
}

impl LogConfig {
    /// Build the level filter, preferring `RUST_LOG` when set.
    pub fn env_filter(&self) -> ObservabilityResult<EnvFilter> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => self.configured_filter(),
        }
    }

    /// Build the level filter from the configured directive only.
    pub fn configured_filter(&self) -> ObservabilityResult<EnvFilter> {
        EnvFilter::try_new(&self.level).map_err(|e| {
            ObservabilityError::InvalidLevel(format!("'{}': {}", self.level, e))
        })
    }
}

/// Install the global subscriber described by `config`.
///
/// Fails if a subscriber is already installed or the log file cannot be
/// opened.
pub fn init_logging(config: &LogConfig) -> ObservabilityResult<()> {
    let filter = config.env_filter()?;

    let stderr_layer = match config.format {
        LogFormat::Text => fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    };

    let file_layer = match config.file {
        Some(ref path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ObservabilityError::LogFile {
                    path: path.clone(),
                    source: e,
                })?;
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))
}
