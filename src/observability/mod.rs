//! Observability subsystem for bookshelf
//!
//! Structured logging through `tracing`. Request spans come from
//! `tower-http`'s trace layer; catalog operations log with the ISBNs they
//! touch as fields.
//!
//! # Usage
//!
//! ```ignore
//! use bookshelf::observability::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default())?;
//! tracing::info!(isbn = "111", "Book added");
//! ```

mod logger;

pub use logger::{init_logging, LogConfig, LogFormat};

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Observability errors. Only raised during startup.
#[derive(Debug, Error)]
pub enum ObservabilityError {
    #[error("Invalid log level {0}")]
    InvalidLevel(String),

    #[error("Failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;
