//! Catalog Service - unified Product and Category store
//!
//! Single source of truth for the storefront catalog. All reads return
//! point-in-time clones, never references into internal state. Every
//! mutating call persists the full snapshot through the backend while
//! the write lock is still held (write-through, no write-behind).
//!
//! A save failure is logged and reported to the caller, but the
//! in-memory mutation stands: memory is authoritative for the rest of
//! the process lifetime, until the next successful save or reload.

use std::sync::Arc;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductUpdate,
};

use crate::common::{CatalogError, CatalogResult};
use crate::persistence::{CatalogBackend, CatalogData};

/// Unified catalog store for Product and Category management
#[derive(Clone)]
pub struct CatalogService {
    backend: Arc<dyn CatalogBackend>,
    /// One lock over both collections: writes are exclusive with all
    /// reads and writes, and save/reload stay atomic across the pair.
    data: Arc<RwLock<CatalogData>>,
}

impl std::fmt::Debug for CatalogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.data.read();
        f.debug_struct("CatalogService")
            .field("products_count", &guard.products.len())
            .field("categories_count", &guard.categories.len())
            .finish()
    }
}

fn validate_name(name: &str) -> CatalogResult<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation("name must not be blank".into()));
    }
    Ok(())
}

fn validate_price(field: &str, value: Decimal) -> CatalogResult<()> {
    if value < Decimal::ZERO {
        return Err(CatalogError::Validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

fn next_id<'a>(ids: impl Iterator<Item = &'a i64>) -> i64 {
    ids.copied().max().unwrap_or(0) + 1
}

impl CatalogService {
    /// Open the store: load the backend snapshot, or start empty when
    /// there is nothing (or nothing readable) to load.
    pub fn open(backend: Arc<dyn CatalogBackend>) -> Self {
        let data = match backend.load() {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Catalog load failed, starting with empty catalog: {e}");
                CatalogData::default()
            }
        };
        tracing::info!(
            "📦 CatalogService: loaded {} categories, {} products",
            data.categories.len(),
            data.products.len()
        );
        Self {
            backend,
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Persist the snapshot the caller already mutated. Called with the
    /// write lock held so readers never see unsaved state as saved.
    fn persist(&self, data: &CatalogData) -> CatalogResult<()> {
        self.backend.save(data).inspect_err(|e| {
            tracing::error!("Catalog persist failed, in-memory state kept: {e}");
        })
    }

    // =========================================================================
    // Snapshot reads
    // =========================================================================

    /// All products, sorted by id. Never fails; empty when the store is
    /// uninitialized.
    pub fn get_all_products(&self) -> Vec<Product> {
        let mut products = self.data.read().products.clone();
        products.sort_by_key(|p| p.id);
        products
    }

    /// All categories, sorted by id
    pub fn get_all_categories(&self) -> Vec<Category> {
        let mut categories = self.data.read().categories.clone();
        categories.sort_by_key(|c| c.id);
        categories
    }

    pub fn get_product(&self, id: i64) -> Option<Product> {
        self.data.read().products.iter().find(|p| p.id == id).cloned()
    }

    pub fn get_category(&self, id: i64) -> Option<Category> {
        self.data
            .read()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Products in a category, strict `category_id` equality
    pub fn get_products_by_category(&self, category_id: i64) -> Vec<Product> {
        let mut products: Vec<_> = self
            .data
            .read()
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();
        products.sort_by_key(|p| p.id);
        products
    }

    /// Clone of the full catalog, for bulk consumers (import planning)
    pub fn snapshot(&self) -> CatalogData {
        self.data.read().clone()
    }

    // =========================================================================
    // Product - Write
    // =========================================================================

    /// Create a product.
    ///
    /// A non-positive or absent `assigned_id` allocates `max + 1`; a
    /// positive one is preserved (import case) and rejected as
    /// [`CatalogError::Duplicate`] when it collides.
    pub fn create_product(
        &self,
        assigned_id: Option<i64>,
        data: ProductCreate,
    ) -> CatalogResult<Product> {
        validate_name(&data.name)?;
        validate_price("price", data.price)?;
        if let Some(old_price) = data.old_price {
            validate_price("old_price", old_price)?;
        }

        let mut guard = self.data.write();
        let id = match assigned_id {
            Some(id) if id > 0 => {
                if guard.products.iter().any(|p| p.id == id) {
                    return Err(CatalogError::Duplicate(format!(
                        "Product {id} already exists"
                    )));
                }
                id
            }
            _ => next_id(guard.products.iter().map(|p| &p.id)),
        };

        let product = Product {
            id,
            name: data.name,
            description: data.description.unwrap_or_default(),
            price: data.price,
            old_price: data.old_price,
            category_id: data.category_id,
            stock: data.stock.unwrap_or(0),
            is_featured: data.is_featured.unwrap_or(false),
            image_url: data.image_url.unwrap_or_default(),
            extra_images: data.extra_images,
        };
        guard.products.push(product.clone());
        self.persist(&guard)?;
        Ok(product)
    }

    /// Update a product; [`CatalogError::NotFound`] when absent
    pub fn update_product(&self, id: i64, data: ProductUpdate) -> CatalogResult<Product> {
        if let Some(ref name) = data.name {
            validate_name(name)?;
        }
        if let Some(price) = data.price {
            validate_price("price", price)?;
        }
        if let Some(old_price) = data.old_price {
            validate_price("old_price", old_price)?;
        }

        let mut guard = self.data.write();
        let product = guard
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("Product {id} not found")))?;

        if let Some(name) = data.name {
            product.name = name;
        }
        if let Some(description) = data.description {
            product.description = description;
        }
        if let Some(price) = data.price {
            product.price = price;
        }
        if let Some(old_price) = data.old_price {
            product.old_price = Some(old_price);
        }
        if let Some(category_id) = data.category_id {
            product.category_id = category_id;
        }
        if let Some(stock) = data.stock {
            product.stock = stock;
        }
        if let Some(is_featured) = data.is_featured {
            product.is_featured = is_featured;
        }
        if let Some(image_url) = data.image_url {
            product.image_url = image_url;
        }
        if let Some(extra_images) = data.extra_images {
            product.extra_images = extra_images;
        }

        let updated = product.clone();
        self.persist(&guard)?;
        Ok(updated)
    }

    /// Adjust stock by a signed delta (inventory collaborator hook).
    /// Rejects adjustments that would take stock below zero.
    pub fn adjust_stock(&self, id: i64, delta: i64) -> CatalogResult<Product> {
        let mut guard = self.data.write();
        let product = guard
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("Product {id} not found")))?;

        let next = i64::from(product.stock) + delta;
        if next < 0 {
            return Err(CatalogError::Validation(format!(
                "Stock for product {id} cannot go below zero"
            )));
        }
        product.stock = next as u32;

        let updated = product.clone();
        self.persist(&guard)?;
        Ok(updated)
    }

    /// Delete a product. Idempotent: `Ok(false)` when the id is absent,
    /// with no state change and no persist.
    pub fn delete_product(&self, id: i64) -> CatalogResult<bool> {
        let mut guard = self.data.write();
        let before = guard.products.len();
        guard.products.retain(|p| p.id != id);
        if guard.products.len() == before {
            return Ok(false);
        }
        self.persist(&guard)?;
        Ok(true)
    }

    /// Empty the product collection, leaving categories untouched
    pub fn clear_products(&self) -> CatalogResult<()> {
        let mut guard = self.data.write();
        guard.products.clear();
        self.persist(&guard)
    }

    // =========================================================================
    // Category - Write
    // =========================================================================

    /// Create a category; same assigned-id semantics as products
    pub fn create_category(
        &self,
        assigned_id: Option<i64>,
        data: CategoryCreate,
    ) -> CatalogResult<Category> {
        validate_name(&data.name)?;

        let mut guard = self.data.write();
        let id = match assigned_id {
            Some(id) if id > 0 => {
                if guard.categories.iter().any(|c| c.id == id) {
                    return Err(CatalogError::Duplicate(format!(
                        "Category {id} already exists"
                    )));
                }
                id
            }
            _ => next_id(guard.categories.iter().map(|c| &c.id)),
        };

        let category = Category {
            id,
            name: data.name,
            description: data.description.unwrap_or_default(),
            image_url: data.image_url.unwrap_or_default(),
        };
        guard.categories.push(category.clone());
        self.persist(&guard)?;
        Ok(category)
    }

    /// Update a category; [`CatalogError::NotFound`] when absent
    pub fn update_category(&self, id: i64, data: CategoryUpdate) -> CatalogResult<Category> {
        if let Some(ref name) = data.name {
            validate_name(name)?;
        }

        let mut guard = self.data.write();
        let category = guard
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| CatalogError::NotFound(format!("Category {id} not found")))?;

        if let Some(name) = data.name {
            category.name = name;
        }
        if let Some(description) = data.description {
            category.description = description;
        }
        if let Some(image_url) = data.image_url {
            category.image_url = image_url;
        }

        let updated = category.clone();
        self.persist(&guard)?;
        Ok(updated)
    }

    /// Delete a category. Products keep their `category_id` reference;
    /// the orphan is tolerated at write time and filtered at read time.
    pub fn delete_category(&self, id: i64) -> CatalogResult<bool> {
        let mut guard = self.data.write();
        let before = guard.categories.len();
        guard.categories.retain(|c| c.id != id);
        if guard.categories.len() == before {
            return Ok(false);
        }

        let orphans = guard.products.iter().filter(|p| p.category_id == id).count();
        if orphans > 0 {
            tracing::warn!("Category {id} deleted, {orphans} products now orphaned");
        }
        self.persist(&guard)?;
        Ok(true)
    }

    /// Empty the category collection, leaving products untouched
    pub fn clear_categories(&self) -> CatalogResult<()> {
        let mut guard = self.data.write();
        guard.categories.clear();
        self.persist(&guard)
    }

    // =========================================================================
    // Bulk operations (import engine)
    // =========================================================================

    /// Replace the entire catalog in one locked write + persist. The
    /// caller supplies final collections, ids included.
    pub fn replace_all(
        &self,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> CatalogResult<()> {
        let mut guard = self.data.write();
        guard.categories = categories;
        guard.products = products;
        self.persist(&guard)
    }

    /// Append an already-planned merge batch in one locked write +
    /// persist. Categories are pushed verbatim (the import engine has
    /// validated and remapped them); products get fresh `max + 1` ids,
    /// monotonically increasing in batch order.
    pub fn append_batch(
        &self,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> CatalogResult<()> {
        let mut guard = self.data.write();
        guard.categories.extend(categories);

        let mut id = next_id(guard.products.iter().map(|p| &p.id));
        for mut product in products {
            product.id = id;
            id += 1;
            guard.products.push(product);
        }
        self.persist(&guard)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Discard in-memory state and re-read the backend. Used after an
    /// external writer may have changed the backing store. A load
    /// failure degrades to the empty catalog rather than crashing.
    pub fn reload(&self) {
        let loaded = match self.backend.load() {
            Ok(data) => data,
            Err(e) => {
                tracing::error!("Catalog reload failed, falling back to empty catalog: {e}");
                CatalogData::default()
            }
        };
        *self.data.write() = loaded;
    }

    /// Force a persist of the current in-memory state (shutdown flush)
    pub fn save(&self) -> CatalogResult<()> {
        let guard = self.data.read();
        self.persist(&guard)
    }
}
