use async_trait::async_trait;
use log::{debug, error, info, warn};
use shared::Transaction;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::traits::{KeyValueStore, StorageResult, TransactionStorage};
use crate::error::StorageError;

/// Store key the mobile client has always used for the transaction list
pub const DEFAULT_STORAGE_KEY: &str = "transactions";

/// Transaction repository that keeps the whole list as one JSON array under a
/// single store key.
///
/// The repository owns the authoritative in-memory snapshot. Mutations are
/// built from the snapshot, written in full, and only swapped into the
/// snapshot once the write succeeded, so a failed write never leaves the
/// in-memory view ahead of storage.
pub struct TransactionRepository<S: KeyValueStore> {
    store: Arc<S>,
    key: String,
    snapshot: RwLock<Vec<Transaction>>,
    load_failed: AtomicBool,
}

impl<S: KeyValueStore> TransactionRepository<S> {
    /// Create a repository over `store` and load the current list
    pub async fn open(store: Arc<S>, key: impl Into<String>) -> Self {
        let repository = Self {
            store,
            key: key.into(),
            snapshot: RwLock::new(Vec::new()),
            load_failed: AtomicBool::new(false),
        };
        repository.reload().await;
        repository
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the last load could not reach the store.
    ///
    /// The snapshot is then empty without the stored list being empty, and
    /// the next write would replace whatever is stored. Hosts should hold off
    /// writes until a `reload()` clears this.
    pub fn load_failed(&self) -> bool {
        self.load_failed.load(Ordering::SeqCst)
    }

    fn parse_transactions(&self, raw: &str) -> StorageResult<Vec<Transaction>> {
        serde_json::from_str(raw).map_err(|e| StorageError::Read {
            key: self.key.clone(),
            reason: e.to_string(),
        })
    }

    /// Serialize and write the full list
    async fn write_transactions(&self, transactions: &[Transaction]) -> StorageResult<()> {
        let json = serde_json::to_string(transactions)?;
        self.store.set(&self.key, &json).await.map_err(|e| {
            error!("Failed to persist {} transactions: {}", transactions.len(), e);
            e
        })
    }

    /// Prepend `transaction` to the locked snapshot, persisting first
    async fn prepend_locked(
        &self,
        snapshot: &mut Vec<Transaction>,
        transaction: Transaction,
    ) -> StorageResult<()> {
        if snapshot.iter().any(|tx| tx.id == transaction.id) {
            return Err(StorageError::DuplicateId(transaction.id));
        }

        let id = transaction.id.clone();
        let mut updated = Vec::with_capacity(snapshot.len() + 1);
        updated.push(transaction);
        updated.extend(snapshot.iter().cloned());

        self.write_transactions(&updated).await?;
        *snapshot = updated;

        info!("Stored transaction {} ({} total)", id, snapshot.len());
        Ok(())
    }

    /// Drop `id` from the locked snapshot, persisting first; unknown ids write nothing
    async fn remove_locked(
        &self,
        snapshot: &mut Vec<Transaction>,
        id: &str,
    ) -> StorageResult<Option<Transaction>> {
        let Some(position) = snapshot.iter().position(|tx| tx.id == id) else {
            debug!("Transaction {} not found, nothing to remove", id);
            return Ok(None);
        };

        let mut updated = snapshot.clone();
        let removed = updated.remove(position);

        self.write_transactions(&updated).await?;
        *snapshot = updated;

        info!("Removed transaction {} ({} remaining)", id, snapshot.len());
        Ok(Some(removed))
    }
}

#[async_trait]
impl<S: KeyValueStore> TransactionStorage for TransactionRepository<S> {
    async fn load(&self) -> Vec<Transaction> {
        let raw = match self.store.get(&self.key).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(
                    "Could not read '{}' from the store, using an empty list until reload: {}",
                    self.key, e
                );
                self.load_failed.store(true, Ordering::SeqCst);
                return Vec::new();
            }
        };
        self.load_failed.store(false, Ordering::SeqCst);

        let Some(raw) = raw else {
            debug!("No stored transactions under '{}'", self.key);
            return Vec::new();
        };

        match self.parse_transactions(&raw) {
            Ok(transactions) => transactions,
            Err(e) => {
                warn!("Treating stored transactions as empty: {}", e);
                Vec::new()
            }
        }
    }

    async fn append(&self, transaction: Transaction) -> StorageResult<Vec<Transaction>> {
        let mut snapshot = self.snapshot.write().await;
        self.prepend_locked(&mut snapshot, transaction).await?;
        Ok(snapshot.clone())
    }

    async fn append_with<F>(&self, build: F) -> StorageResult<Transaction>
    where
        F: FnOnce(&[Transaction]) -> Transaction + Send,
    {
        let mut snapshot = self.snapshot.write().await;
        let transaction = build(&snapshot);
        self.prepend_locked(&mut snapshot, transaction.clone()).await?;
        Ok(transaction)
    }

    async fn remove(&self, id: &str) -> StorageResult<Vec<Transaction>> {
        let mut snapshot = self.snapshot.write().await;
        self.remove_locked(&mut snapshot, id).await?;
        Ok(snapshot.clone())
    }

    async fn take(&self, id: &str) -> StorageResult<Option<Transaction>> {
        let mut snapshot = self.snapshot.write().await;
        self.remove_locked(&mut snapshot, id).await
    }

    async fn reload(&self) -> Vec<Transaction> {
        let transactions = self.load().await;
        let mut snapshot = self.snapshot.write().await;
        *snapshot = transactions;
        debug!("Reloaded {} transactions from '{}'", snapshot.len(), self.key);
        snapshot.clone()
    }

    async fn snapshot(&self) -> Vec<Transaction> {
        self.snapshot.read().await.clone()
    }

    async fn get(&self, id: &str) -> Option<Transaction> {
        self.snapshot
            .read()
            .await
            .iter()
            .find(|tx| tx.id == id)
            .cloned()
    }
}
