//! # Error Types
//!
//! Domain-specific error types for shopfront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shopfront-core errors (this file)                                     │
//! │  ├── CoreError        - Amount math and cart invariants                │
//! │  └── ValidationError  - Catalog shape and purchasability checks        │
//! │                                                                         │
//! │  shopfront-store errors (separate crate)                               │
//! │  ├── StoreError       - Config, persistence, background tasks          │
//! │  └── FetchError       - Catalog fetch (shown to the user)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A price amount string is not a base-10 decimal number.
    ///
    /// ## When This Occurs
    /// - Empty amount (`""`)
    /// - Letters or exponents (`"abc"`, `"1e5"`)
    /// - More than one decimal point, or too many fraction digits
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Fixed-point arithmetic left the representable range.
    #[error("Amount arithmetic overflowed")]
    AmountOverflow,

    /// A line item carries a quantity below 1.
    #[error("Invalid quantity {quantity} for {product_id}/{variant_id}")]
    InvalidQuantity {
        product_id: String,
        variant_id: String,
        quantity: u32,
    },

    /// Two line items share the same (product, variant) key.
    #[error("Duplicate line item for {product_id}/{variant_id}")]
    DuplicateLineItem {
        product_id: String,
        variant_id: String,
    },
}

impl CoreError {
    /// Creates an InvalidAmount error.
    pub fn invalid_amount(value: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidAmount {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The variant is not one of the product's variants.
    #[error("Variant {variant_id} does not belong to product {product_id}")]
    VariantNotInProduct {
        product_id: String,
        variant_id: String,
    },

    /// The variant is not for sale or has no stock left.
    #[error("Variant {variant_id} is not available for sale")]
    VariantUnavailable { variant_id: String },

    /// Two variants of one product share an id.
    #[error("Product {product_id} lists variant {variant_id} more than once")]
    DuplicateVariant {
        product_id: String,
        variant_id: String,
    },

    /// Invalid format (e.g., unparsable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
