//! # Store Error Types
//!
//! Error types for the async stores and their collaborators.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  StoreError (logged, never shown)       FetchError (shown to the user) │
//! │  ┌─────────────────┐  ┌──────────────┐  ┌─────────────────────────┐    │
//! │  │  Configuration  │  │ Persistence  │  │  MissingEndpoint        │    │
//! │  │                 │  │              │  │  Transport              │    │
//! │  │  InvalidConfig  │  │  InvalidKey  │  │  Status                 │    │
//! │  │  ConfigLoad...  │  │  ReadFailed  │  │  Decode                 │    │
//! │  │                 │  │  WriteFailed │  │  InvalidCatalog         │    │
//! │  └─────────────────┘  └──────────────┘  └─────────────────────────┘    │
//! │                                                                         │
//! │  FetchError's Display text becomes CatalogState.error verbatim.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for catalog fetches.
pub type FetchResult<T> = Result<T, FetchError>;

// =============================================================================
// Store Error
// =============================================================================

/// Failures of configuration, persistence and background tasks.
///
/// None of these reach the UI: the stores log them and fall back to a safe
/// default (empty cart, unchanged state).
#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    /// Key cannot be used by the adapter.
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// Reading a blob failed.
    #[error("Failed to read '{key}': {reason}")]
    ReadFailed { key: String, reason: String },

    /// Writing a blob failed.
    #[error("Failed to write '{key}': {reason}")]
    WriteFailed { key: String, reason: String },

    /// Encoding the cart failed.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// A spawned persist task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

impl StoreError {
    /// Creates a ReadFailed error.
    pub fn read_failed(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::ReadFailed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a WriteFailed error.
    pub fn write_failed(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::WriteFailed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::TaskFailed(err.to_string())
    }
}

// =============================================================================
// Fetch Error
// =============================================================================

/// Catalog fetch failures.
///
/// ## Display Text
/// The message is what the product list shows under its retry button, so
/// it is written for shoppers, not operators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// No catalog endpoint configured.
    #[error("Catalog endpoint is not configured. Set SHOPFRONT_API_URL or catalog.api_url")]
    MissingEndpoint,

    /// The request never produced a response.
    #[error("Failed to fetch products: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Failed to fetch products (HTTP {0})")]
    Status(u16),

    /// The body was not a JSON list of products.
    #[error("Failed to read products: {0}")]
    Decode(String),

    /// The list decoded but breaks catalog rules.
    #[error("Catalog contains an invalid product: {0}")]
    InvalidCatalog(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<shopfront_core::ValidationError> for FetchError {
    fn from(err: shopfront_core::ValidationError) -> Self {
        FetchError::InvalidCatalog(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::Status(503).to_string(),
            "Failed to fetch products (HTTP 503)"
        );
        assert!(FetchError::MissingEndpoint
            .to_string()
            .contains("not configured"));
    }

    #[test]
    fn test_store_error_helpers() {
        let err = StoreError::write_failed("CARD", "disk full");
        assert_eq!(err.to_string(), "Failed to write 'CARD': disk full");
    }
}
