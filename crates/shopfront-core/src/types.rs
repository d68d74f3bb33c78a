//! # Catalog Types
//!
//! Product records exactly as the catalog endpoint delivers them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────────┐         ┌─────────────────────────┐           │
//! │  │      Product        │ 1    1..│     ProductVariant      │           │
//! │  │  ─────────────────  │────────►│  ─────────────────────  │           │
//! │  │  id                 │         │  id (unique in product) │           │
//! │  │  title              │         │  title                  │           │
//! │  │  description        │         │  price: Money           │           │
//! │  │  images: [Image]    │         │  availableForSale       │           │
//! │  │  variants           │         │  quantityAvailable      │           │
//! │  └─────────────────────┘         │  image: Image?          │           │
//! │                                  └─────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All records serialize with camelCase field names, matching the catalog
//! JSON and the persisted cart blob.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Stock level at or below which an available variant counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

// =============================================================================
// Image
// =============================================================================

/// A product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Image {
    pub id: String,
    pub url: String,
}

// =============================================================================
// Product Variant
// =============================================================================

/// A purchasable configuration of a product (size, color, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductVariant {
    /// Unique within the owning product.
    pub id: String,

    pub title: String,

    pub price: Money,

    pub available_for_sale: bool,

    pub quantity_available: u32,

    #[serde(default)]
    pub image: Option<Image>,
}

impl ProductVariant {
    /// For sale and at least one unit in stock.
    pub fn is_available(&self) -> bool {
        self.available_for_sale && self.quantity_available > 0
    }

    /// Available, with only a handful of units left.
    pub fn is_low_stock(&self) -> bool {
        self.is_available() && self.quantity_available <= LOW_STOCK_THRESHOLD
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Rich-text description; empty when the catalog omits it.
    #[serde(default)]
    pub description_html: String,

    /// Display order is significant.
    #[serde(default)]
    pub images: Vec<Image>,

    /// Never empty in a valid catalog (see [`crate::validation::validate_product`]).
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Looks up a variant by id.
    pub fn find_variant(&self, variant_id: &str) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Checks whether the variant (by id) belongs to this product.
    pub fn contains_variant(&self, variant_id: &str) -> bool {
        self.find_variant(variant_id).is_some()
    }

    /// The variant a product page preselects.
    ///
    /// First available variant, else the first variant. `None` only for a
    /// product without variants.
    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.variants
            .iter()
            .find(|v| v.is_available())
            .or_else(|| self.variants.first())
    }

    /// Checks if any variant can currently be bought.
    pub fn has_available_variant(&self) -> bool {
        self.variants.iter().any(ProductVariant::is_available)
    }

    /// Image to show for a variant: its own image, else the first product image.
    pub fn display_image_url<'a>(&'a self, variant: &'a ProductVariant) -> Option<&'a str> {
        variant
            .image
            .as_ref()
            .or_else(|| self.images.first())
            .map(|image| image.url.as_str())
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{product, variant};
    use super::*;

    #[test]
    fn test_variant_availability() {
        let mut v = variant("v1", "10.00");
        assert!(v.is_available());
        assert!(!v.is_low_stock());

        v.quantity_available = 3;
        assert!(v.is_low_stock());

        v.quantity_available = 0;
        assert!(!v.is_available());
        assert!(!v.is_low_stock());

        v.quantity_available = 3;
        v.available_for_sale = false;
        assert!(!v.is_available());
    }

    #[test]
    fn test_default_variant_prefers_available() {
        let mut sold_out = variant("v1", "10.00");
        sold_out.quantity_available = 0;
        let p = product("p1", vec![sold_out, variant("v2", "12.00")]);
        assert_eq!(p.default_variant().unwrap().id, "v2");
    }

    #[test]
    fn test_default_variant_falls_back_to_first() {
        let mut a = variant("v1", "10.00");
        a.available_for_sale = false;
        let mut b = variant("v2", "12.00");
        b.quantity_available = 0;
        let p = product("p1", vec![a, b]);
        assert_eq!(p.default_variant().unwrap().id, "v1");
        assert!(!p.has_available_variant());
    }

    #[test]
    fn test_display_image_fallback() {
        let mut v = variant("v1", "10.00");
        let p = product("p1", vec![v.clone()]);
        assert_eq!(
            p.display_image_url(&v),
            Some("https://cdn.example.com/p1.png")
        );

        v.image = Some(Image {
            id: "vimg".to_string(),
            url: "https://cdn.example.com/v1.png".to_string(),
        });
        assert_eq!(
            p.display_image_url(&v),
            Some("https://cdn.example.com/v1.png")
        );
    }

    #[test]
    fn test_deserialize_catalog_json() {
        let json = r#"{
            "id": "p1",
            "title": "Test Product",
            "description": "Description of Test Product",
            "descriptionHtml": "",
            "images": [{ "id": "img1", "url": "http://example.com/img1.png" }],
            "variants": [{
                "id": "v1",
                "title": "Variant 1",
                "price": { "amount": "10.00", "currencyCode": "USD" },
                "availableForSale": true,
                "quantityAvailable": 5,
                "image": { "id": "img1", "url": "http://example.com/img1.png" }
            }]
        }"#;

        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.variants.len(), 1);
        assert_eq!(p.variants[0].price.currency_code, "USD");
        assert_eq!(p.variants[0].quantity_available, 5);
        assert!(p.contains_variant("v1"));
        assert!(!p.contains_variant("v2"));
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let json = r#"{
            "id": "v1", "title": "V", "availableForSale": true,
            "quantityAvailable": -1,
            "price": { "amount": "1.00", "currencyCode": "USD" }
        }"#;
        assert!(serde_json::from_str::<ProductVariant>(json).is_err());
    }
}
