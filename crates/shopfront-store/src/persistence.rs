//! # Persistence Adapters
//!
//! The cart is stored as one opaque blob under one key. The stores only
//! know the [`KeyValueStore`] trait; what sits behind it is up to the
//! composition root.
//!
//! ## Adapters
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    KeyValueStore Implementations                        │
//! │                                                                         │
//! │  MemoryStore                         FileStore                          │
//! │  ───────────                         ─────────                          │
//! │  • HashMap behind an RwLock          • One file per key under a dir     │
//! │  • Lost on process exit              • Survives restarts                │
//! │  • Tests, embedding                  • CLI default                      │
//! │                                                                         │
//! │  FileStore write path:                                                  │
//! │    bytes ──► .<key>.<uuid>.tmp ──► rename ──► <key>.dat                 │
//! │    A reader sees the old blob or the new one, never half of one.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Longest key the adapters accept.
pub const MAX_KEY_LEN: usize = 128;

/// Opaque async key-value blob store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the blob stored under `key`, or `None` if there is none.
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Replaces the blob stored under `key`.
    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;
}

/// Validates a storage key.
///
/// ## Rules
/// - 1 to [`MAX_KEY_LEN`] characters
/// - ASCII letters, digits, `.`, `_`, `-` only
/// - Must not start with `.` (reserved for temp files)
pub fn validate_key(key: &str) -> StoreResult<()> {
    let well_formed = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));

    if well_formed {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Memory Store
// =============================================================================

/// In-process store. Contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        MemoryStore {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

// =============================================================================
// File Store
// =============================================================================

/// Directory-backed store, one `<key>.dat` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `root`. The directory is created on first
    /// write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStore { root: root.into() }
    }

    /// The directory blobs are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.dat", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let path = self.path_for(key)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!(?path, len = bytes.len(), "Read blob");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::read_failed(key, e)),
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        let path = self.path_for(key)?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::write_failed(key, e))?;

        let tmp = self
            .root
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()));

        if let Err(e) = tokio::fs::write(&tmp, &value).await {
            remove_temp(&tmp).await;
            return Err(StoreError::write_failed(key, e));
        }

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            remove_temp(&tmp).await;
            return Err(StoreError::write_failed(key, e));
        }

        debug!(?path, len = value.len(), "Wrote blob");
        Ok(())
    }
}

/// Deletes a leftover temp file. A file that was never created is fine.
async fn remove_temp(tmp: &Path) {
    match tokio::fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(?tmp, error = %e, "Failed to remove temp file"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("CARD").is_ok());
        assert!(validate_key("cart-v2.user_1").is_ok());

        for bad in ["", ".hidden", "a/b", "..", "a b", "ä"] {
            assert!(validate_key(bad).is_err(), "accepted {:?}", bad);
        }
        assert!(validate_key(&"k".repeat(MAX_KEY_LEN + 1)).is_err());
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("CARD").await.unwrap(), None);

        store.set("CARD", b"[]".to_vec()).await.unwrap();
        assert_eq!(store.get("CARD").await.unwrap(), Some(b"[]".to_vec()));

        store.set("CARD", b"[1]".to_vec()).await.unwrap();
        assert_eq!(store.get("CARD").await.unwrap(), Some(b"[1]".to_vec()));
    }

    #[tokio::test]
    async fn test_file_store_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get("CARD").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_roundtrip_and_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        store.set("CARD", b"first".to_vec()).await.unwrap();
        store.set("CARD", b"second".to_vec()).await.unwrap();
        assert_eq!(store.get("CARD").await.unwrap(), Some(b"second".to_vec()));

        // Only the final blob remains; no temp files left behind.
        let names: Vec<String> = std::fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["CARD.dat".to_string()]);
    }

    #[tokio::test]
    async fn test_file_store_rejects_bad_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", b"x".to_vec()).await,
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(
            store.get("../escape").await,
            Err(StoreError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn test_file_store_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the root directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let store = FileStore::new(&blocker);
        assert!(matches!(
            store.set("CARD", b"x".to_vec()).await,
            Err(StoreError::WriteFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        // A non-empty directory where the blob should land makes the rename fail.
        let target = dir.path().join("CARD.dat");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), b"x").unwrap();

        assert!(matches!(
            store.set("CARD", b"payload".to_vec()).await,
            Err(StoreError::WriteFailed { .. })
        ));

        let names: Vec<String> = std::fs::read_dir(store.root())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["CARD.dat".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_temp_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let tmp = dir.path().join(".CARD.never-written.tmp");

        remove_temp(&tmp).await;
        assert!(!tmp.exists());
    }
}
