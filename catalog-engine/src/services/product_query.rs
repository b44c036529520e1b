//! Product Query - category/brand/price filtering and sorting
//!
//! Read-only views for the presentation layer, computed over store
//! snapshots. Category scoping is strict id equality; the label
//! heuristics live in the [`CategoryResolver`], never here.

use rust_decimal::Decimal;
use shared::models::Product;

use super::{CatalogService, CategoryResolver};

/// Sort order for product listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Parse a user-facing sort key. Unrecognized keys fall back to
    /// name ascending rather than erroring.
    pub fn parse(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "name_desc" | "name-desc" => SortKey::NameDesc,
            "price" | "price_asc" | "price-asc" => SortKey::PriceAsc,
            "price_desc" | "price-desc" => SortKey::PriceDesc,
            _ => SortKey::NameAsc,
        }
    }
}

/// Filter parameters for a product listing
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Strict category scope; `None` lists all categories
    pub category_id: Option<i64>,
    /// Case-insensitive substring over name or description
    pub brand: Option<String>,
    /// Raw `"min-max"` range; malformed input applies no filter
    pub price_range: Option<String>,
    pub sort: SortKey,
}

#[derive(Clone)]
pub struct ProductQuery {
    store: CatalogService,
    resolver: CategoryResolver,
}

impl ProductQuery {
    pub fn new(store: CatalogService, resolver: CategoryResolver) -> Self {
        Self { store, resolver }
    }

    /// Matching products, never null: an empty result is an empty list
    pub fn query(&self, filter: &ProductFilter) -> Vec<Product> {
        let mut products = match filter.category_id {
            Some(category_id) => self.store.get_products_by_category(category_id),
            None => self.store.get_all_products(),
        };

        if let Some(brand) = filter.brand.as_deref() {
            let needle = brand.trim().to_lowercase();
            if !needle.is_empty() {
                products.retain(|p| {
                    p.name.to_lowercase().contains(&needle)
                        || p.description.to_lowercase().contains(&needle)
                });
            }
        }

        if let Some(range) = filter.price_range.as_deref()
            && let Some((low, high)) = parse_price_range(range)
        {
            products.retain(|p| p.price >= low && p.price <= high);
        }

        sort_products(&mut products, filter.sort);
        products
    }

    /// Query with the category given as a user-facing label (route
    /// segment, feed column) instead of an id.
    pub fn query_by_label(&self, label: &str, filter: &ProductFilter) -> Vec<Product> {
        let category_id = self
            .resolver
            .resolve(label, &self.store.get_all_categories());
        let scoped = ProductFilter {
            category_id: Some(category_id),
            ..filter.clone()
        };
        self.query(&scoped)
    }
}

/// Parse `"min-max"` price bounds. Anything malformed (missing bound,
/// non-numeric text, inverted range) yields `None` and the caller
/// applies no filter.
fn parse_price_range(raw: &str) -> Option<(Decimal, Decimal)> {
    let (low, high) = raw.split_once('-')?;
    let low: Decimal = low.trim().parse().ok()?;
    let high: Decimal = high.trim().parse().ok()?;
    if low > high {
        return None;
    }
    Some((low, high))
}

fn sort_products(products: &mut [Product], sort: SortKey) {
    match sort {
        SortKey::NameAsc => {
            products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        }
        SortKey::NameDesc => {
            products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
        }
        SortKey::PriceAsc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::persistence::MemoryBackend;
    use shared::models::ProductCreate;

    fn query_over(products: Vec<(&str, &str, i64, i64)>) -> (ProductQuery, CatalogService) {
        let store = CatalogService::open(Arc::new(MemoryBackend::new()));
        for (name, description, cents, category_id) in products {
            store
                .create_product(
                    None,
                    ProductCreate {
                        name: name.to_string(),
                        description: Some(description.to_string()),
                        price: Decimal::new(cents, 2),
                        old_price: None,
                        category_id,
                        stock: None,
                        is_featured: None,
                        image_url: None,
                        extra_images: vec![],
                    },
                )
                .unwrap();
        }
        let resolver = CategoryResolver::with_default_taxonomy(1);
        (ProductQuery::new(store.clone(), resolver), store)
    }

    #[test]
    fn category_filter_is_strict_equality() {
        let (query, _) = query_over(vec![
            ("A", "", 1000, 1),
            ("B", "", 1000, 2),
            ("C", "", 1000, 1),
        ]);

        let filter = ProductFilter {
            category_id: Some(1),
            ..Default::default()
        };
        let result = query.query(&filter);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|p| p.category_id == 1));
    }

    #[test]
    fn brand_filter_matches_name_or_description() {
        let (query, _) = query_over(vec![
            ("ASUS TUF B550", "motherboard", 10000, 4),
            ("Prime Z690", "from Asus", 20000, 4),
            ("MSI MAG", "motherboard", 15000, 4),
        ]);

        let filter = ProductFilter {
            brand: Some("asus".to_string()),
            ..Default::default()
        };
        let result = query.query(&filter);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn price_range_is_inclusive() {
        let (query, _) = query_over(vec![
            ("A", "", 999, 1),
            ("B", "", 1000, 1),
            ("C", "", 5000, 1),
            ("D", "", 5001, 1),
        ]);

        let filter = ProductFilter {
            price_range: Some("10.00 - 50.00".to_string()),
            ..Default::default()
        };
        let names: Vec<String> = query.query(&filter).into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn malformed_price_ranges_apply_no_filter() {
        let (query, _) = query_over(vec![("A", "", 1000, 1), ("B", "", 9000, 1)]);

        for raw in ["abc", "10..20", "10-", "-", "50.00-10.00", ""] {
            let filter = ProductFilter {
                price_range: Some(raw.to_string()),
                ..Default::default()
            };
            assert_eq!(query.query(&filter).len(), 2, "range {raw:?} must be ignored");
        }
    }

    #[test]
    fn sort_keys_order_results() {
        let (query, _) = query_over(vec![
            ("beta", "", 3000, 1),
            ("Alpha", "", 2000, 1),
            ("gamma", "", 1000, 1),
        ]);

        let by = |sort: SortKey| {
            let filter = ProductFilter {
                sort,
                ..Default::default()
            };
            query
                .query(&filter)
                .into_iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
        };

        assert_eq!(by(SortKey::NameAsc), vec!["Alpha", "beta", "gamma"]);
        assert_eq!(by(SortKey::NameDesc), vec!["gamma", "beta", "Alpha"]);
        assert_eq!(by(SortKey::PriceAsc), vec!["gamma", "Alpha", "beta"]);
        assert_eq!(by(SortKey::PriceDesc), vec!["beta", "Alpha", "gamma"]);
    }

    #[test]
    fn unrecognized_sort_keys_fall_back_to_name_ascending() {
        assert_eq!(SortKey::parse("price_desc"), SortKey::PriceDesc);
        assert_eq!(SortKey::parse("PRICE"), SortKey::PriceAsc);
        assert_eq!(SortKey::parse("newest"), SortKey::NameAsc);
        assert_eq!(SortKey::parse(""), SortKey::NameAsc);
    }

    #[test]
    fn empty_store_yields_an_empty_list() {
        let (query, _) = query_over(vec![]);
        assert!(query.query(&ProductFilter::default()).is_empty());
    }

    #[test]
    fn label_queries_resolve_through_the_resolver() {
        let (query, store) = query_over(vec![("Ryzen 5", "", 20000, 1), ("DDR5 kit", "", 9000, 2)]);
        store
            .create_category(
                Some(1),
                shared::models::CategoryCreate {
                    name: "CPU".to_string(),
                    description: None,
                    image_url: None,
                },
            )
            .unwrap();

        let result = query.query_by_label("processors", &ProductFilter::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Ryzen 5");
    }
}
