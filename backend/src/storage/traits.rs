//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use async_trait::async_trait;
use shared::Transaction;

use crate::error::StorageError;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Local key-value persistence holding serialized values under string keys.
///
/// Operations are atomic units: a reader never observes a partial `set`.
/// There is no cross-call locking; concurrent writers resolve as last write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when absent
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`; deleting a missing key is not an error
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Trait defining the interface for transaction storage operations
///
/// Every mutation rewrites the whole collection. The list is kept
/// most-recent-first in insertion order; no sorting is applied.
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    /// Read the full list from the store, recovering unreadable data as empty
    async fn load(&self) -> Vec<Transaction>;

    /// Prepend a new transaction and persist the whole list
    async fn append(&self, transaction: Transaction) -> StorageResult<Vec<Transaction>>;

    /// Build a transaction from the current list and append it, all under one
    /// write lock, so `build` sees every record appended before it.
    /// Returns the stored transaction.
    async fn append_with<F>(&self, build: F) -> StorageResult<Transaction>
    where
        F: FnOnce(&[Transaction]) -> Transaction + Send;

    /// Remove the transaction with `id` and persist; unknown ids are a no-op
    async fn remove(&self, id: &str) -> StorageResult<Vec<Transaction>>;

    /// Like `remove`, but returns the removed transaction (`None` for an
    /// unknown id)
    async fn take(&self, id: &str) -> StorageResult<Option<Transaction>>;

    /// Replace the in-memory snapshot with what is currently stored
    async fn reload(&self) -> Vec<Transaction>;

    /// The current in-memory snapshot
    async fn snapshot(&self) -> Vec<Transaction>;

    /// Retrieve a specific transaction by ID from the snapshot
    async fn get(&self, id: &str) -> Option<Transaction>;
}
