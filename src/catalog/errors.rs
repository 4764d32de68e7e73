//! # Catalog Errors

use thiserror::Error;

use crate::storage::StorageError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("ISBN already exists: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    LockPoisoned(String),
}

impl CatalogError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::NotFound(_) => 404,
            CatalogError::Conflict(_) => 409,
            CatalogError::Validation(_) => 422,
            CatalogError::Storage(_) => 500,
            CatalogError::LockPoisoned(_) => 500,
        }
    }

    /// Whether the facade recovers from this error with a client status
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}
