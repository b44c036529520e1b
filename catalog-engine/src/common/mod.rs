//! Common utilities and shared infrastructure
//!
//! - [`CatalogError`] / [`CatalogResult`] - error taxonomy for catalog operations
//! - Logging setup

pub mod error;
pub mod logger;

// Re-export commonly used items
pub use error::{CatalogError, CatalogResult};
pub use logger::{init_logger, init_logger_with_file};
