//! # Shopfront Configuration
//!
//! Where the catalog lives and where the cart is kept.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOPFRONT_API_URL=https://shop.example.com/api/products            │
//! │     SHOPFRONT_CART_KEY=CARD                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <PATH>, or                                                │
//! │     ~/.config/shopfront/shopfront.toml (Linux)                         │
//! │     ~/Library/Application Support/com.shopfront.app/shopfront.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no endpoint, 10s timeout, key "CARD", platform data dir            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shopfront.toml
//! [catalog]
//! api_url = "https://shop.example.com/api/products"
//! timeout_secs = 10
//!
//! [cart]
//! storage_key = "CARD"
//! data_dir = "/var/lib/shopfront"
//! ```
//!
//! A missing `api_url` is accepted here. The catalog store reports it as a
//! fetch error, so the user sees it and can retry after fixing it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use shopfront_core::DEFAULT_CART_STORAGE_KEY;

use crate::error::{StoreError, StoreResult};
use crate::persistence::validate_key;

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "shopfront.toml";

// =============================================================================
// Catalog Settings
// =============================================================================

/// Remote catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// URL returning a JSON array of products.
    #[serde(default)]
    pub api_url: Option<String>,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            api_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl CatalogSettings {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Cart Settings
// =============================================================================

/// Cart persistence settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Key the cart blob is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory for the file store. Falls back to the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    DEFAULT_CART_STORAGE_KEY.to_string()
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            storage_key: default_storage_key(),
            data_dir: None,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl ShopConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// default file is not.
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(StoreError::ConfigLoadFailed(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> StoreResult<Self> {
        info!(?path, "Loading shopfront config from file");
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StoreError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if let Some(ref url) = self.catalog.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(StoreError::InvalidConfig(format!(
                    "Catalog URL must start with http:// or https://, got: {}",
                    url
                )));
            }
        }

        if self.catalog.timeout_secs == 0 {
            return Err(StoreError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        validate_key(&self.cart.storage_key).map_err(|_| {
            StoreError::InvalidConfig(format!(
                "storage_key must be 1-128 characters of [A-Za-z0-9._-], got: '{}'",
                self.cart.storage_key
            ))
        })?;

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from an arbitrary variable source.
    ///
    /// Blank values are ignored so that `SHOPFRONT_API_URL=` does not mask
    /// the file setting.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = var("SHOPFRONT_API_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.api_url = Some(url);
        }

        if let Some(timeout) = var("SHOPFRONT_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(t) => self.catalog.timeout_secs = t,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric SHOPFRONT_TIMEOUT_SECS"),
            }
        }

        if let Some(key) = var("SHOPFRONT_CART_KEY") {
            debug!(key = %key, "Overriding cart storage key from environment");
            self.cart.storage_key = key;
        }

        if let Some(dir) = var("SHOPFRONT_DATA_DIR") {
            self.cart.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the catalog endpoint if configured.
    pub fn api_url(&self) -> Option<&str> {
        self.catalog.api_url.as_deref()
    }

    /// Returns the cart storage key.
    pub fn storage_key(&self) -> &str {
        &self.cart.storage_key
    }

    /// Directory the file store writes to.
    ///
    /// Configured `data_dir`, else the platform data dir, else
    /// `./.shopfront`.
    pub fn data_dir(&self) -> PathBuf {
        self.cart
            .data_dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
            .unwrap_or_else(|| PathBuf::from(".shopfront"))
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "shopfront", "app")
}
