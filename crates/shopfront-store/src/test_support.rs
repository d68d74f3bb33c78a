//! Catalog builders and failing collaborators shared by the store tests.

use async_trait::async_trait;
use serde_json::{json, Value};

use shopfront_core::{Image, Money, Product, ProductVariant};

use crate::error::{StoreError, StoreResult};
use crate::persistence::KeyValueStore;

pub fn variant(id: &str, amount: &str) -> ProductVariant {
    ProductVariant {
        id: id.to_string(),
        title: format!("Variant {}", id),
        price: Money::new(amount, "USD"),
        available_for_sale: true,
        quantity_available: 10,
        image: None,
    }
}

pub fn product(id: &str, variants: Vec<ProductVariant>) -> Product {
    Product {
        id: id.to_string(),
        title: format!("Product {}", id),
        description: format!("Description of Product {}", id),
        description_html: String::new(),
        images: vec![Image {
            id: format!("img-{}", id),
            url: format!("https://cdn.example.com/{}.png", id),
        }],
        variants,
    }
}

/// Catalog JSON for one product with a single variant `v1`.
pub fn product_json(id: &str, amount: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Product {}", id),
        "description": "",
        "images": [],
        "variants": [{
            "id": "v1",
            "title": "Default",
            "price": { "amount": amount, "currencyCode": "USD" },
            "availableForSale": true,
            "quantityAvailable": 5
        }]
    })
}

/// Store whose reads and writes always fail.
pub struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Err(StoreError::read_failed(key, "device unavailable"))
    }

    async fn set(&self, key: &str, _value: Vec<u8>) -> StoreResult<()> {
        Err(StoreError::write_failed(key, "disk full"))
    }
}
