//! # Catalog State
//!
//! The product list plus the lifecycle of the fetch that fills it.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Fetch Lifecycle                              │
//! │                                                                         │
//! │   ┌──────┐  begin_refresh   ┌─────────┐  finish_success   ┌─────────┐  │
//! │   │ Idle │ ───────────────► │ Loading │ ────────────────► │ Success │  │
//! │   └──────┘                  └─────────┘                   └─────────┘  │
//! │                               ▲  │                           │          │
//! │                               │  │ finish_failure            │          │
//! │                               │  ▼                           │          │
//! │                             ┌─────────┐                      │          │
//! │                             │  Error  │                      │          │
//! │                             └─────────┘                      │          │
//! │                               │                              │          │
//! │                               └──── begin_refresh ◄──────────┘          │
//! │                                                                         │
//! │  No terminal state. A failure keeps the previous products               │
//! │  (stale-but-available).                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;

/// Shown when a fetch fails without a usable message.
pub const GENERIC_FETCH_ERROR: &str = "Something went wrong";

/// Where the catalog is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CatalogPhase {
    /// Nothing fetched yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch succeeded.
    Success,
    /// The last fetch failed.
    Error,
}

/// Products plus fetch status.
///
/// ## Invariants
/// - `is_loading` and `error.is_some()` are never both true
/// - `error` is cleared when a fetch starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogState {
    pub products: Vec<Product>,

    pub is_loading: bool,

    pub error: Option<String>,

    /// When the products were last replaced by a successful fetch.
    #[ts(type = "string | null")]
    pub last_refreshed_at: Option<DateTime<Utc>>,
}

impl CatalogState {
    /// Creates an empty, idle catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Loading`: sets the flag and drops any previous error.
    pub fn begin_refresh(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    /// Replaces the products verbatim and leaves `Loading`.
    pub fn finish_success(&mut self, products: Vec<Product>, at: DateTime<Utc>) {
        self.products = products;
        self.is_loading = false;
        self.error = None;
        self.last_refreshed_at = Some(at);
    }

    /// Records a failure and leaves `Loading`. Products are untouched.
    ///
    /// A blank message is replaced with [`GENERIC_FETCH_ERROR`].
    pub fn finish_failure(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.is_loading = false;
        self.error = Some(if message.trim().is_empty() {
            GENERIC_FETCH_ERROR.to_string()
        } else {
            message
        });
    }

    /// Derives the lifecycle phase from the fields.
    pub fn phase(&self) -> CatalogPhase {
        if self.is_loading {
            CatalogPhase::Loading
        } else if self.error.is_some() {
            CatalogPhase::Error
        } else if self.last_refreshed_at.is_some() {
            CatalogPhase::Success
        } else {
            CatalogPhase::Idle
        }
    }

    /// Looks up a product by id.
    pub fn find_product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::fixtures::{product, variant};

    #[test]
    fn test_lifecycle_success() {
        let mut state = CatalogState::new();
        assert_eq!(state.phase(), CatalogPhase::Idle);

        state.begin_refresh();
        assert_eq!(state.phase(), CatalogPhase::Loading);

        let now = Utc::now();
        state.finish_success(vec![product("p1", vec![variant("v1", "1.00")])], now);
        assert_eq!(state.phase(), CatalogPhase::Success);
        assert_eq!(state.last_refreshed_at, Some(now));
        assert!(state.find_product("p1").is_some());
    }

    #[test]
    fn test_failure_keeps_products() {
        let mut state = CatalogState::new();
        state.begin_refresh();
        state.finish_success(vec![product("p1", vec![variant("v1", "1.00")])], Utc::now());

        state.begin_refresh();
        state.finish_failure("Failed to fetch products");

        assert_eq!(state.phase(), CatalogPhase::Error);
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some("Failed to fetch products"));
        assert_eq!(state.products.len(), 1);
    }

    #[test]
    fn test_begin_refresh_clears_error() {
        let mut state = CatalogState::new();
        state.begin_refresh();
        state.finish_failure("boom");

        state.begin_refresh();
        assert!(state.is_loading);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_blank_failure_message() {
        let mut state = CatalogState::new();
        state.begin_refresh();
        state.finish_failure("  ");
        assert_eq!(state.error.as_deref(), Some(GENERIC_FETCH_ERROR));
    }

    #[test]
    fn test_success_replaces_rather_than_merges() {
        let mut state = CatalogState::new();
        state.finish_success(
            vec![
                product("p1", vec![variant("v1", "1.00")]),
                product("p2", vec![variant("v1", "1.00")]),
            ],
            Utc::now(),
        );
        state.finish_success(vec![product("p3", vec![variant("v1", "1.00")])], Utc::now());

        let ids: Vec<&str> = state.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p3"]);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(CatalogState::new()).unwrap();
        assert_eq!(json["isLoading"], false);
        assert!(json["error"].is_null());
        assert!(json["lastRefreshedAt"].is_null());
    }
}
