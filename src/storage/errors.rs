//! Storage error types
//!
//! - `Io`: file open/read/write/fsync/rename failures
//! - `Parse`: a stored line that does not decode into a valid book
//! - `Archive`: zip creation failure
//!
//! None of these are recovered. The facade turns them into a 500.

use std::io;

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed record at line {line}: {reason}")]
    Parse { line: u64, reason: String },

    #[error("Archive error: {0}")]
    Archive(String),
}

impl StorageError {
    /// Create a new storage I/O error
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        StorageError::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a parse error for a stored line
    pub fn parse_at_line(line: u64, reason: impl Into<String>) -> Self {
        StorageError::Parse {
            line,
            reason: reason.into(),
        }
    }

    /// Convert a CSV layer error, keeping I/O failures distinct from
    /// malformed content.
    pub(crate) fn from_csv(err: csv::Error, context: &str) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        let reason = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::io_error(context, source),
            _ => Self::parse_at_line(line, reason),
        }
    }

    /// Returns whether this error is a parse failure
    pub fn is_parse_error(&self) -> bool {
        matches!(self, StorageError::Parse { .. })
    }
}
