//! cli-import — catalog feed import tool
//!
//! Reads an already-structured JSON feed file (the parsed output of a
//! spreadsheet or feed reader) and runs it through the import engine
//! against the configured catalog file.
//!
//! Usage:
//!
//! ```text
//! cli-import <feed.json>             # additive merge (default)
//! cli-import --replace <feed.json>   # destructive replace (bootstrap)
//! ```

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use catalog_engine::{
    CatalogConfig, CatalogService, CategoryResolver, FileBackend, ImportBatch, ImportService,
    init_logger,
};

fn main() -> Result<()> {
    // Load .env file
    let _ = dotenv::dotenv();
    init_logger();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (replace, feed_path) = match args.as_slice() {
        [path] => (false, path.clone()),
        [flag, path] if flag == "--replace" => (true, path.clone()),
        _ => bail!("usage: cli-import [--replace] <feed.json>"),
    };

    let config = CatalogConfig::from_env();
    tracing::info!(
        "Importing {} into {} (env: {})",
        feed_path,
        config.catalog_path().display(),
        config.environment
    );

    let raw = std::fs::read_to_string(&feed_path)
        .with_context(|| format!("Failed to read feed file {feed_path}"))?;
    let batch: ImportBatch =
        serde_json::from_str(&raw).with_context(|| format!("Invalid feed file {feed_path}"))?;

    let backend = Arc::new(FileBackend::new(config.catalog_path()));
    let store = CatalogService::open(backend);
    let resolver = CategoryResolver::with_default_taxonomy(config.default_category_id);
    let importer = ImportService::new(store.clone(), resolver);

    let report = if replace {
        importer.replace_import(batch)?
    } else {
        importer.merge_import(batch)?
    };

    tracing::info!(
        "Done: categories {}/{} accepted, products {}/{} accepted",
        report.categories_accepted,
        report.categories_accepted + report.categories_rejected,
        report.products_accepted,
        report.products_accepted + report.products_rejected
    );
    Ok(())
}
