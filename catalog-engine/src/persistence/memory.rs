//! In-memory catalog backend
//!
//! Backs tests and ephemeral stores. Behaves like the file backend
//! minus the disk: load returns the last saved snapshot, an unused
//! backend loads empty.

use parking_lot::Mutex;

use super::{CatalogBackend, CatalogData};
use crate::common::CatalogResult;

#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: Mutex<CatalogData>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogBackend for MemoryBackend {
    fn load(&self) -> CatalogResult<CatalogData> {
        Ok(self.data.lock().clone())
    }

    fn save(&self, data: &CatalogData) -> CatalogResult<()> {
        *self.data.lock() = data.clone();
        Ok(())
    }
}
