//! # Storage Module
//!
//! Handles all data persistence for the charity tracker.
//!
//! The whole transaction collection lives as one JSON array under a single
//! key of a local key-value store. `KeyValueStore` abstracts that store
//! (a directory of JSON files on desktop, an in-memory map for embedding
//! and tests) and `TransactionRepository` implements `TransactionStorage`
//! on top of any of them.
//!
//! ## Stored Format
//!
//! ```json
//! [
//!   {"id":"transaction::expense::1706000000000","amount":40,"description":"Otobüs",
//!    "person":"Ali","category":"Ulaşım","type":"expense","date":"2024-01-20T09:00:00Z"}
//! ]
//! ```
//!
//! There is no schema version field; the list is read and written whole.

pub mod file_store;
pub mod memory_store;
pub mod traits;
pub mod transaction_repository;

#[cfg(test)]
pub mod test_utils;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use traits::{KeyValueStore, StorageResult, TransactionStorage};
pub use transaction_repository::{TransactionRepository, DEFAULT_STORAGE_KEY};
