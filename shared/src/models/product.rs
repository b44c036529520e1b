//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Current sale price, non-negative
    pub price: Decimal,
    /// Previous price, rendered struck-through when discounted
    pub old_price: Option<Decimal>,
    /// Category reference. Soft: an orphaned reference is tolerated in
    /// the store, but the query layer never surfaces a product under a
    /// category it does not belong to.
    pub category_id: i64,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub image_url: String,
    /// Secondary image references, in display order
    #[serde(default)]
    pub extra_images: Vec<String>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub old_price: Option<Decimal>,
    pub category_id: i64,
    pub stock: Option<u32>,
    pub is_featured: Option<bool>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub extra_images: Vec<String>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub old_price: Option<Decimal>,
    pub category_id: Option<i64>,
    pub stock: Option<u32>,
    pub is_featured: Option<bool>,
    pub image_url: Option<String>,
    pub extra_images: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_deserializes_with_defaults() {
        let json = r#"{"id":1,"name":"Ryzen 7 5800X","price":289.99,"old_price":null,"category_id":1}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 1);
        assert_eq!(p.stock, 0);
        assert!(!p.is_featured);
        assert!(p.extra_images.is_empty());
    }

    #[test]
    fn update_payload_defaults_to_no_changes() {
        let u = ProductUpdate::default();
        assert!(u.name.is_none());
        assert!(u.price.is_none());
        assert!(u.extra_images.is_none());
    }
}
