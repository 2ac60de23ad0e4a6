//! In-memory `KeyValueStore`, for embedding hosts and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use super::traits::{KeyValueStore, StorageResult};
use crate::error::StorageError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `key` = `value`
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self {
            values: Mutex::new(values),
            ..Self::default()
        }
    }

    /// Make every subsequent `set`/`remove` fail until switched off again
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent `get` fail until switched off again
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self, key: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write {
                key: key.to_string(),
                reason: "store is not accepting writes".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Read {
                key: key.to_string(),
                reason: "store is not accepting reads".to_string(),
            });
        }
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_writable(key)?;
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_writable(key)?;
        self.values.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trips_values() {
        let store = MemoryStore::new();
        assert_eq!(store.get("transactions").await.unwrap(), None);

        store.set("transactions", "[]").await.unwrap();
        assert_eq!(store.get("transactions").await.unwrap().as_deref(), Some("[]"));

        store.remove("transactions").await.unwrap();
        assert_eq!(store.get("transactions").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failing_writes_keep_previous_value() {
        let store = MemoryStore::with_value("transactions", "[]");
        store.fail_writes(true);

        let err = store.set("transactions", "[1]").await.unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert!(store.remove("transactions").await.is_err());
        assert_eq!(store.get("transactions").await.unwrap().as_deref(), Some("[]"));

        store.fail_writes(false);
        store.set("transactions", "[1]").await.unwrap();
        assert_eq!(store.get("transactions").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_failing_reads() {
        let store = MemoryStore::with_value("transactions", "[]");
        store.fail_reads(true);
        assert!(matches!(store.get("transactions").await, Err(StorageError::Read { .. })));

        store.fail_reads(false);
        assert_eq!(store.get("transactions").await.unwrap().as_deref(), Some("[]"));
    }
}
