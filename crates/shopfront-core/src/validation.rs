//! # Validation Module
//!
//! Catalog checks that live outside the cart.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog fetch (shopfront-store)                              │
//! │  └── validate_catalog() on every decoded response                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Composition root (UI / CLI)                                  │
//! │  └── ensure_purchasable() before add_to_cart                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart                                                          │
//! │  └── NO checks: add_to_cart trusts its caller                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use shopfront_core::validation::ensure_purchasable;
//! # use shopfront_core::{Product, ProductVariant};
//! # fn demo(product: &Product, variant: &ProductVariant) {
//! if ensure_purchasable(product, variant).is_ok() {
//!     // safe to call CartStore::add_to_cart
//! }
//! # }
//! ```

use crate::error::ValidationError;
use crate::money::Amount;
use crate::types::{Product, ProductVariant};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Catalog Shape
// =============================================================================

/// Validates one catalog product.
///
/// ## Rules
/// - `id` must not be blank
/// - At least one variant
/// - Variant ids non-blank and unique within the product
/// - Every variant price parses as a decimal amount
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product.id".to_string(),
        });
    }

    if product.variants.is_empty() {
        return Err(ValidationError::Required {
            field: format!("product {} variants", product.id),
        });
    }

    for (i, variant) in product.variants.iter().enumerate() {
        if variant.id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: format!("product {} variant id", product.id),
            });
        }

        if product.variants[..i].iter().any(|v| v.id == variant.id) {
            return Err(ValidationError::DuplicateVariant {
                product_id: product.id.clone(),
                variant_id: variant.id.clone(),
            });
        }

        if let Err(e) = Amount::parse(&variant.price.amount) {
            return Err(ValidationError::InvalidFormat {
                field: format!("variant {} price", variant.id),
                reason: e.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a whole catalog response, stopping at the first bad product.
pub fn validate_catalog(products: &[Product]) -> ValidationResult<()> {
    products.iter().try_for_each(validate_product)
}

// =============================================================================
// Purchasability
// =============================================================================

/// Checks that a variant can go into the cart.
///
/// ## Rules
/// - The variant (by id) is one of the product's variants
/// - The variant is for sale and has stock
///
/// ## User Workflow
/// ```text
/// Product page: user taps "Add to Cart"
///      │
///      ▼
/// ensure_purchasable(product, variant) ← THIS FUNCTION
///      │
///      ├── not in product? → VariantNotInProduct
///      ├── sold out?       → VariantUnavailable ("Cannot Add to Cart")
///      │
///      └── OK → CartStore::add_to_cart, then refresh catalog
/// ```
pub fn ensure_purchasable(product: &Product, variant: &ProductVariant) -> ValidationResult<()> {
    if !product.contains_variant(&variant.id) {
        return Err(ValidationError::VariantNotInProduct {
            product_id: product.id.clone(),
            variant_id: variant.id.clone(),
        });
    }

    if !variant.is_available() {
        return Err(ValidationError::VariantUnavailable {
            variant_id: variant.id.clone(),
        });
    }

    Ok(())
}
