//! # File Store
//!
//! Key-value store that keeps each key in its own JSON file inside a data
//! directory:
//!
//! ```text
//! data/
//! └── transactions.json    ← value of the "transactions" key
//! ```
//!
//! Writes go to a uniquely named temp file first and are then renamed over the
//! target, so a crash mid-write never leaves a truncated value behind.

use async_trait::async_trait;
use log::{debug, info};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::traits::{KeyValueStore, StorageResult};
use crate::error::StorageError;

/// File-backed `KeyValueStore` rooted at a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    base_directory: PathBuf,
}

impl FileStore {
    /// Open a store in `base_directory`, creating the directory if needed
    pub fn new(base_directory: impl AsRef<Path>) -> StorageResult<Self> {
        let base_directory = base_directory.as_ref().to_path_buf();
        if !base_directory.exists() {
            std::fs::create_dir_all(&base_directory)?;
            info!("Created data directory: {:?}", base_directory);
        }
        Ok(Self { base_directory })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the file holding `key`
    pub fn path_for_key(&self, key: &str) -> PathBuf {
        self.base_directory
            .join(format!("{}.json", Self::safe_file_stem(key)))
    }

    /// Map an arbitrary key onto a file name made of `[A-Za-z0-9_-]`
    fn safe_file_stem(key: &str) -> String {
        let stem: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if stem.is_empty() {
            "_".to_string()
        } else {
            stem
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for_key(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => {
                debug!("Read {} bytes from {:?}", contents.len(), path);
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for_key(key);
        let temp_path = path.with_extension(format!("json.{}.tmp", uuid::Uuid::new_v4().simple()));
        let write_error = |e: std::io::Error| StorageError::Write {
            key: key.to_string(),
            reason: e.to_string(),
        };

        fs::write(&temp_path, value).await.map_err(write_error)?;
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(write_error(e));
        }

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for_key(key);
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Removed {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path()).unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let (store, _temp_dir) = create_store();
        assert_eq!(store.get("transactions").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (store, _temp_dir) = create_store();
        store.set("transactions", "[]").await.unwrap();
        assert_eq!(store.get("transactions").await.unwrap().as_deref(), Some("[]"));

        store.set("transactions", "[1]").await.unwrap();
        assert_eq!(store.get("transactions").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_set_leaves_no_temp_files() {
        let (store, temp_dir) = create_store();
        store.set("transactions", "[]").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["transactions.json".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (store, _temp_dir) = create_store();
        store.set("transactions", "[]").await.unwrap();
        store.remove("transactions").await.unwrap();
        store.remove("transactions").await.unwrap();
        assert_eq!(store.get("transactions").await.unwrap(), None);
    }

    #[test]
    fn test_keys_map_to_safe_file_names() {
        let (store, temp_dir) = create_store();
        assert_eq!(
            store.path_for_key("../secrets"),
            temp_dir.path().join("___secrets.json")
        );
        assert_eq!(store.path_for_key(""), temp_dir.path().join("_.json"));
    }

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let store = FileStore::new(&nested).unwrap();
        assert!(store.base_directory().is_dir());
    }
}
