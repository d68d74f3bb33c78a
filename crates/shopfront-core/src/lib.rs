//! # shopfront-core: Pure Cart & Catalog Logic
//!
//! This crate holds the state rules of the storefront as pure functions and
//! plain data. The async stores in `shopfront-store` wrap these types; the
//! UI only ever reads them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Shopfront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               UI / composition root (screens, CLI)              │   │
//! │  │    Product list ──► Product details ──► Cart                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           shopfront-store: CartStore, CatalogStore              │   │
//! │  │     persistence adapter, catalog fetcher, config                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ shopfront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌────────────┐    │   │
//! │  │   │  types   │  │  money   │  │   cart   │  │  catalog   │    │   │
//! │  │   │ Product  │  │  Amount  │  │   Cart   │  │ CatalogSt. │    │   │
//! │  │   │ Variant  │  │  Money   │  │ LineItem │  │  phases    │    │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └────────────┘    │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO RUNTIME • NO LOGGING                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (Product, ProductVariant, Image)
//! - [`money`] - Price record and fixed-point `Amount`
//! - [`cart`] - Cart and line items
//! - [`catalog`] - Catalog state and fetch lifecycle
//! - [`validation`] - Catalog shape and purchasability checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use shopfront_core::{Cart, Money, Product, ProductVariant};
//!
//! let variant = ProductVariant {
//!     id: "v1".into(),
//!     title: "Large".into(),
//!     price: Money::new("10.55", "USD"),
//!     available_for_sale: true,
//!     quantity_available: 4,
//!     image: None,
//! };
//! let product = Product {
//!     id: "p1".into(),
//!     title: "Tee".into(),
//!     description: String::new(),
//!     description_html: String::new(),
//!     images: vec![],
//!     variants: vec![variant.clone()],
//! };
//!
//! let mut cart = Cart::new();
//! cart.add_item(&product, &variant);
//! cart.add_item(&product, &variant);
//! assert_eq!(cart.item_count(), 1);
//! assert_eq!(cart.total_price(), "21.10");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, CartSummary};
pub use catalog::{CatalogPhase, CatalogState};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Amount, Money};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart blob is written under.
///
/// Carts persisted by earlier app releases live under this key, so it must
/// not change without a migration.
pub const DEFAULT_CART_STORAGE_KEY: &str = "CARD";
