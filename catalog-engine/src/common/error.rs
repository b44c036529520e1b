//! Catalog error types

use thiserror::Error;

/// Catalog error types
///
/// Validation / not-found / duplicate conditions are synchronous caller
/// errors and leave the store unchanged. Persistence failures are
/// logged and reported, but an in-memory mutation that already applied
/// stands — memory is authoritative until the next successful save or
/// reload.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Persistence(err.to_string())
    }
}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
