//! Catalog services
//!
//! - [`CatalogService`] - single source of truth for products and categories
//! - [`ImportService`] - replace / additive-merge ingestion of external batches
//! - [`CategoryResolver`] - category label → canonical id
//! - [`ProductQuery`] - category/brand/price filtering and sorting

pub mod catalog_service;
pub mod category_resolver;
pub mod import_service;
pub mod product_query;

// Re-exports
pub use catalog_service::CatalogService;
pub use category_resolver::CategoryResolver;
pub use import_service::{CategoryRecord, ImportBatch, ImportReport, ImportService, ProductRecord};
pub use product_query::{ProductFilter, ProductQuery, SortKey};
