//! Import Service - bulk ingestion of external catalog batches
//!
//! External readers (spreadsheet dump, JSON feed) hand this engine
//! already-parsed record batches; the engine knows nothing about the
//! source format. Two entry points with different conflict policies:
//!
//! - **replace**: destructive seed. The store contents are replaced
//!   wholesale; record ids are preserved when positive, allocated when
//!   not. An empty batch clears the catalog.
//! - **merge**: repeatable additive ingestion. Invalid and duplicate
//!   records are dropped and counted instead of aborting the batch, so
//!   re-running the same feed never inflates the catalog.
//!
//! After either entry point the engine triggers a store reload so
//! callers holding a refreshed reference observe the latest state.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{Category, Product};

use super::{CatalogService, CategoryResolver};
use crate::common::CatalogResult;
use crate::persistence::CatalogData;

// =============================================================================
// Feed records
// =============================================================================

/// Category record as handed over by an external reader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

/// Product record as handed over by an external reader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub old_price: Option<Decimal>,
    /// Structured category reference; `0` when the feed only names the
    /// category (see `category`)
    #[serde(default)]
    pub category_id: i64,
    /// Name-only category label, resolved through the
    /// [`CategoryResolver`] when `category_id` is unset
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub extra_images: Vec<String>,
}

/// One parsed feed batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportBatch {
    #[serde(default)]
    pub categories: Vec<CategoryRecord>,
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

/// Accepted/rejected counts for one import run. Rejections are
/// non-fatal: the batch completes and the counts tell the operator what
/// was dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub categories_accepted: usize,
    pub categories_rejected: usize,
    pub products_accepted: usize,
    pub products_rejected: usize,
}

impl CategoryRecord {
    fn into_category(self, id: i64) -> Category {
        Category {
            id,
            name: self.name,
            description: self.description,
            image_url: self.image_url,
        }
    }
}

impl ProductRecord {
    fn into_product(self, id: i64, category_id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            old_price: self.old_price,
            category_id,
            stock: self.stock,
            is_featured: self.is_featured,
            image_url: self.image_url,
            extra_images: self.extra_images,
        }
    }
}

// =============================================================================
// ImportService
// =============================================================================

#[derive(Clone)]
pub struct ImportService {
    store: CatalogService,
    resolver: CategoryResolver,
}

impl ImportService {
    pub fn new(store: CatalogService, resolver: CategoryResolver) -> Self {
        Self { store, resolver }
    }

    /// Replace the entire catalog with a freshly parsed batch
    /// (bootstrap from a spreadsheet dump).
    pub fn replace_import(&self, batch: ImportBatch) -> CatalogResult<ImportReport> {
        let mut report = ImportReport::default();

        let mut categories: Vec<Category> = Vec::new();
        let mut seen_category_ids = HashSet::new();
        let mut next_category_id = batch.categories.iter().map(|c| c.id).max().unwrap_or(0).max(0);
        for record in batch.categories {
            let id = if record.id > 0 {
                record.id
            } else {
                next_category_id += 1;
                next_category_id
            };
            if !seen_category_ids.insert(id) {
                tracing::warn!("Replace import: duplicate category id {id}, record dropped");
                report.categories_rejected += 1;
                continue;
            }
            categories.push(record.into_category(id));
            report.categories_accepted += 1;
        }

        let mut products: Vec<Product> = Vec::new();
        let mut seen_product_ids = HashSet::new();
        let mut next_product_id = batch.products.iter().map(|p| p.id).max().unwrap_or(0).max(0);
        for record in batch.products {
            let category_id = if record.category_id > 0 {
                record.category_id
            } else if let Some(label) = record.category.as_deref() {
                self.resolver.resolve(label, &categories)
            } else {
                record.category_id
            };

            let id = if record.id > 0 {
                record.id
            } else {
                next_product_id += 1;
                next_product_id
            };
            if !seen_product_ids.insert(id) {
                tracing::warn!("Replace import: duplicate product id {id}, record dropped");
                report.products_rejected += 1;
                continue;
            }
            products.push(record.into_product(id, category_id));
            report.products_accepted += 1;
        }

        tracing::info!(
            "Replace import: {} categories, {} products",
            report.categories_accepted,
            report.products_accepted
        );
        self.store.replace_all(categories, products)?;
        self.store.reload();
        Ok(report)
    }

    /// Merge a batch into the existing catalog without ever removing or
    /// duplicating records.
    pub fn merge_import(&self, batch: ImportBatch) -> CatalogResult<ImportReport> {
        let existing = self.store.snapshot();
        let plan = plan_merge(&existing, batch, &self.resolver);

        tracing::info!(
            "Merge import: +{} categories (-{}), +{} products (-{})",
            plan.report.categories_accepted,
            plan.report.categories_rejected,
            plan.report.products_accepted,
            plan.report.products_rejected
        );
        self.store.append_batch(plan.categories, plan.products)?;
        self.store.reload();
        Ok(plan.report)
    }
}

// =============================================================================
// Merge planning
// =============================================================================

struct MergePlan {
    categories: Vec<Category>,
    products: Vec<Product>,
    report: ImportReport,
}

/// Pure merge policy: decide, against a catalog snapshot, which batch
/// records survive and how batch category references map onto canonical
/// ids. Product ids are left at `0` for the store to allocate.
fn plan_merge(existing: &CatalogData, batch: ImportBatch, resolver: &CategoryResolver) -> MergePlan {
    let mut report = ImportReport::default();

    // -- Categories: drop non-positive ids, reuse same-name records --
    let mut valid_ids: HashSet<i64> = existing.categories.iter().map(|c| c.id).collect();
    let mut names_to_ids: HashMap<String, i64> = existing
        .categories
        .iter()
        .map(|c| (c.name.to_lowercase(), c.id))
        .collect();
    // batch id → canonical id, for records folded into a same-name category
    let mut remap: HashMap<i64, i64> = HashMap::new();
    let mut categories: Vec<Category> = Vec::new();

    for record in batch.categories {
        if record.id <= 0 {
            tracing::warn!(
                "Merge import: category \"{}\" has no valid id, dropped",
                record.name
            );
            report.categories_rejected += 1;
            continue;
        }
        let name_key = record.name.to_lowercase();
        if let Some(&known_id) = names_to_ids.get(&name_key) {
            // Same name already known: fold onto it, keep references valid
            remap.insert(record.id, known_id);
            report.categories_rejected += 1;
            continue;
        }
        if valid_ids.contains(&record.id) {
            tracing::warn!(
                "Merge import: category id {} already taken, record dropped",
                record.id
            );
            report.categories_rejected += 1;
            continue;
        }
        valid_ids.insert(record.id);
        names_to_ids.insert(name_key, record.id);
        let id = record.id;
        categories.push(record.into_category(id));
        report.categories_accepted += 1;
    }

    // -- Products: validate, resolve references, drop duplicates --
    let known_categories: Vec<Category> = existing
        .categories
        .iter()
        .cloned()
        .chain(categories.iter().cloned())
        .collect();
    let mut taken_names: HashSet<String> = existing
        .products
        .iter()
        .map(|p| p.name.trim().to_lowercase())
        .collect();
    let mut products: Vec<Product> = Vec::new();

    for record in batch.products {
        if record.name.trim().is_empty() {
            report.products_rejected += 1;
            continue;
        }
        if record.price < Decimal::ZERO {
            tracing::warn!(
                "Merge import: product \"{}\" has a negative price, dropped",
                record.name
            );
            report.products_rejected += 1;
            continue;
        }

        let category_id = if record.category_id > 0 {
            // Batch-scoped reference first: it may have been folded onto
            // an existing same-name category
            *remap.get(&record.category_id).unwrap_or(&record.category_id)
        } else if let Some(label) = record.category.as_deref() {
            resolver.resolve(label, &known_categories)
        } else {
            record.category_id
        };
        if !valid_ids.contains(&category_id) {
            tracing::warn!(
                "Merge import: product \"{}\" references unknown category {category_id}, dropped",
                record.name
            );
            report.products_rejected += 1;
            continue;
        }

        // Store-wide duplicate-name policy, not scoped to category
        if !taken_names.insert(record.name.trim().to_lowercase()) {
            tracing::debug!("Merge import: product \"{}\" already present, skipped", record.name);
            report.products_rejected += 1;
            continue;
        }

        products.push(record.into_product(0, category_id));
        report.products_accepted += 1;
    }

    MergePlan {
        categories,
        products,
        report,
    }
}

#[cfg(test)]
mod tests;
