//! Flat-file catalog backend
//!
//! One pretty-printed JSON document per store, human-diffable. Saves
//! write to a temporary file in the target directory and atomically
//! rename over the snapshot, so a concurrent reload never observes a
//! truncated file.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::models::{Category, Product};

use super::{CatalogBackend, CatalogData};
use crate::common::{CatalogError, CatalogResult};

/// Current on-disk document version
const FORMAT_VERSION: u32 = 1;

/// On-disk envelope around the catalog snapshot
#[derive(Serialize, Deserialize)]
struct CatalogDocument {
    version: u32,
    saved_at: i64,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    products: Vec<Product>,
}

/// File-backed [`CatalogBackend`]
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogBackend for FileBackend {
    fn load(&self) -> CatalogResult<CatalogData> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No catalog file at {}, starting empty", self.path.display());
                return Ok(CatalogData::default());
            }
            Err(e) => {
                return Err(CatalogError::Persistence(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        let doc: CatalogDocument = serde_json::from_str(&raw).map_err(|e| {
            CatalogError::Persistence(format!("Invalid catalog file {}: {e}", self.path.display()))
        })?;

        if doc.version > FORMAT_VERSION {
            return Err(CatalogError::Persistence(format!(
                "Catalog file {} has unsupported version {}",
                self.path.display(),
                doc.version
            )));
        }

        Ok(CatalogData {
            categories: doc.categories,
            products: doc.products,
        })
    }

    fn save(&self, data: &CatalogData) -> CatalogResult<()> {
        let doc = CatalogDocument {
            version: FORMAT_VERSION,
            saved_at: shared::util::now_millis(),
            categories: data.categories.clone(),
            products: data.products.clone(),
        };
        let json = serde_json::to_vec_pretty(&doc)?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        // Temp file in the same directory so the rename stays on one filesystem
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            CatalogError::Persistence(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;

        Ok(())
    }
}
