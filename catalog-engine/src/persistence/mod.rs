//! Persistence backends
//!
//! The catalog store talks to storage through the narrow
//! [`CatalogBackend`] seam (load-all / save-all). The flat-file backend
//! is the production implementation; [`MemoryBackend`] backs tests and
//! ephemeral stores. Swapping the medium later must not touch the
//! store's API or invariants.

pub mod file_backend;
pub mod memory;

pub use file_backend::FileBackend;
pub use memory::MemoryBackend;

use serde::{Deserialize, Serialize};
use shared::models::{Category, Product};

use crate::common::CatalogResult;

/// Full catalog snapshot, the unit of persistence.
///
/// Persisted state must equal in-memory state after every mutating
/// store call, so the backend always receives the whole snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Storage seam for the catalog store
pub trait CatalogBackend: Send + Sync {
    /// Load the full catalog. A missing backing store is not an error:
    /// implementations return an empty snapshot for a fresh start.
    fn load(&self) -> CatalogResult<CatalogData>;

    /// Persist the full catalog. Must leave the previous snapshot
    /// readable if the write fails partway.
    fn save(&self, data: &CatalogData) -> CatalogResult<()>;
}
