use std::sync::Arc;

use rust_decimal::Decimal;

use super::{CategoryRecord, ImportBatch, ImportService, ProductRecord};
use crate::persistence::MemoryBackend;
use crate::services::{CatalogService, CategoryResolver};

fn create_test_importer() -> (CatalogService, ImportService) {
    let store = CatalogService::open(Arc::new(MemoryBackend::new()));
    let service = ImportService::new(store.clone(), CategoryResolver::with_default_taxonomy(1));
    (store, service)
}

fn category_record(id: i64, name: &str) -> CategoryRecord {
    CategoryRecord {
        id,
        name: name.to_string(),
        ..Default::default()
    }
}

fn product_record(name: &str, category_id: i64) -> ProductRecord {
    ProductRecord {
        name: name.to_string(),
        category_id,
        price: Decimal::new(1999, 2),
        ..Default::default()
    }
}

// ========================================================================
// Additive merge
// ========================================================================

#[test]
fn merge_into_empty_store_keeps_valid_records_only() {
    let (store, importer) = create_test_importer();

    let report = importer
        .merge_import(ImportBatch {
            categories: vec![category_record(1, "CPU"), category_record(2, "RAM")],
            products: vec![
                product_record("A", 1),
                product_record("B", 2),
                product_record("C", 99),
            ],
        })
        .unwrap();

    assert_eq!(report.categories_accepted, 2);
    assert_eq!(report.categories_rejected, 0);
    assert_eq!(report.products_accepted, 2);
    assert_eq!(report.products_rejected, 1);

    assert_eq!(store.get_all_categories().len(), 2);
    let products = store.get_all_products();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, 1);
    assert_eq!(products[0].name, "A");
    assert_eq!(products[1].id, 2);
    assert_eq!(products[1].name, "B");
}

#[test]
fn merge_drops_categories_without_a_positive_id() {
    let (store, importer) = create_test_importer();

    let report = importer
        .merge_import(ImportBatch {
            categories: vec![category_record(0, "CPU"), category_record(-3, "RAM")],
            products: vec![],
        })
        .unwrap();

    assert_eq!(report.categories_accepted, 0);
    assert_eq!(report.categories_rejected, 2);
    assert!(store.get_all_categories().is_empty());
}

#[test]
fn merge_skips_case_insensitive_duplicate_product_names() {
    let (store, importer) = create_test_importer();
    importer
        .merge_import(ImportBatch {
            categories: vec![category_record(1, "CPU")],
            products: vec![product_record("Ryzen 5", 1)],
        })
        .unwrap();

    let report = importer
        .merge_import(ImportBatch {
            categories: vec![],
            products: vec![
                product_record("RYZEN 5", 1),
                product_record("ryzen 5", 1),
                product_record("Ryzen 7", 1),
            ],
        })
        .unwrap();

    assert_eq!(report.products_accepted, 1);
    assert_eq!(report.products_rejected, 2);

    let names: Vec<String> = store
        .get_all_products()
        .iter()
        .map(|p| p.name.to_lowercase())
        .collect();
    let unique: std::collections::HashSet<&String> = names.iter().collect();
    assert_eq!(names.len(), unique.len(), "no case-insensitive duplicates");
}

#[test]
fn merge_never_decreases_the_product_count() {
    let (store, importer) = create_test_importer();
    importer
        .merge_import(ImportBatch {
            categories: vec![category_record(1, "CPU")],
            products: vec![product_record("A", 1), product_record("B", 1)],
        })
        .unwrap();
    let before = store.get_all_products().len();

    // Re-running the same feed is idempotent
    importer
        .merge_import(ImportBatch {
            categories: vec![category_record(1, "CPU")],
            products: vec![product_record("A", 1), product_record("B", 1)],
        })
        .unwrap();

    assert_eq!(store.get_all_products().len(), before);
}

#[test]
fn merge_folds_same_name_categories_onto_the_existing_id() {
    let (store, importer) = create_test_importer();
    importer
        .merge_import(ImportBatch {
            categories: vec![category_record(3, "CPU")],
            products: vec![],
        })
        .unwrap();

    // The feed uses its own id for the same category
    let report = importer
        .merge_import(ImportBatch {
            categories: vec![category_record(7, "cpu")],
            products: vec![product_record("Ryzen 5", 7)],
        })
        .unwrap();

    assert_eq!(report.categories_accepted, 0);
    assert_eq!(report.categories_rejected, 1);
    assert_eq!(report.products_accepted, 1);

    // One CPU category, and the product landed in it
    assert_eq!(store.get_all_categories().len(), 1);
    assert_eq!(store.get_products_by_category(3).len(), 1);
}

#[test]
fn merge_resolves_name_only_category_labels() {
    let (store, importer) = create_test_importer();

    let mut by_label = product_record("Ryzen 5", 0);
    by_label.category = Some("processors".to_string());

    let report = importer
        .merge_import(ImportBatch {
            categories: vec![category_record(1, "CPU")],
            products: vec![by_label],
        })
        .unwrap();

    assert_eq!(report.products_accepted, 1);
    assert_eq!(store.get_products_by_category(1).len(), 1);
}

#[test]
fn merge_allocates_monotonically_increasing_ids() {
    let (store, importer) = create_test_importer();
    store
        .create_category(Some(1), shared::models::CategoryCreate {
            name: "CPU".to_string(),
            description: None,
            image_url: None,
        })
        .unwrap();
    store
        .create_product(Some(10), shared::models::ProductCreate {
            name: "Existing".to_string(),
            description: None,
            price: Decimal::new(100, 0),
            old_price: None,
            category_id: 1,
            stock: None,
            is_featured: None,
            image_url: None,
            extra_images: vec![],
        })
        .unwrap();

    importer
        .merge_import(ImportBatch {
            categories: vec![],
            products: vec![product_record("A", 1), product_record("B", 1)],
        })
        .unwrap();

    let ids: Vec<i64> = store.get_all_products().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![10, 11, 12]);
}

#[test]
fn merge_rejects_blank_names_and_negative_prices() {
    let (store, importer) = create_test_importer();

    let mut negative = product_record("Cheap", 1);
    negative.price = Decimal::new(-500, 2);

    let report = importer
        .merge_import(ImportBatch {
            categories: vec![category_record(1, "CPU")],
            products: vec![product_record("  ", 1), negative, product_record("Fine", 1)],
        })
        .unwrap();

    assert_eq!(report.products_accepted, 1);
    assert_eq!(report.products_rejected, 2);
    assert_eq!(store.get_all_products()[0].name, "Fine");
}

// ========================================================================
// Replace import
// ========================================================================

#[test]
fn replace_with_an_empty_batch_clears_the_catalog() {
    let (store, importer) = create_test_importer();
    importer
        .merge_import(ImportBatch {
            categories: vec![category_record(1, "CPU")],
            products: vec![product_record("A", 1)],
        })
        .unwrap();

    let report = importer.replace_import(ImportBatch::default()).unwrap();

    assert_eq!(report.products_accepted, 0);
    assert!(store.get_all_categories().is_empty());
    assert!(store.get_all_products().is_empty());
}

#[test]
fn replace_preserves_positive_ids_and_allocates_the_rest() {
    let (store, importer) = create_test_importer();

    let mut unassigned = product_record("B", 1);
    unassigned.id = 0;
    let mut assigned = product_record("A", 1);
    assigned.id = 40;

    importer
        .replace_import(ImportBatch {
            categories: vec![category_record(5, "CPU")],
            products: vec![assigned, unassigned],
        })
        .unwrap();

    let ids: Vec<i64> = store.get_all_products().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![40, 41]);
    assert_eq!(store.get_all_categories()[0].id, 5);
}

#[test]
fn replace_discards_previous_contents() {
    let (store, importer) = create_test_importer();
    importer
        .merge_import(ImportBatch {
            categories: vec![category_record(1, "CPU")],
            products: vec![product_record("Old", 1)],
        })
        .unwrap();

    importer
        .replace_import(ImportBatch {
            categories: vec![category_record(2, "RAM")],
            products: vec![product_record("New", 2)],
        })
        .unwrap();

    let products = store.get_all_products();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].name, "New");
    assert_eq!(store.get_all_categories()[0].name, "RAM");
}
