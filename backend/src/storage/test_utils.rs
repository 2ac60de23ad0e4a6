/// Test utilities module for automatic cleanup and consistent test fixtures
///
/// `TestEnvironment` owns a temporary directory that is removed when the
/// environment is dropped, even if the test panics.

use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{Transaction, TransactionType};
use std::sync::Arc;
use tempfile::TempDir;

use super::file_store::FileStore;

/// Temporary data directory with a file store rooted in it
pub struct TestEnvironment {
    pub store: Arc<FileStore>,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        init_logging();
        let temp_dir = TempDir::new()?;
        let store = Arc::new(FileStore::new(temp_dir.path())?);
        Ok(Self {
            store,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Route `log` output through the test harness; safe to call repeatedly
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid RFC 3339 fixture date")
        .with_timezone(&Utc)
}

fn transaction(id: &str, amount: f64, transaction_type: TransactionType, date: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount,
        description: format!("{} {}", transaction_type, id),
        person: "Test Person".to_string(),
        category: None,
        charity_category: None,
        transaction_type,
        date: at(date),
    }
}

pub fn income(id: &str, amount: f64, date: &str) -> Transaction {
    transaction(id, amount, TransactionType::Income, date)
}

pub fn expense(id: &str, amount: f64, date: &str) -> Transaction {
    transaction(id, amount, TransactionType::Expense, date)
}

/// Expense with a general category
pub fn categorized_expense(id: &str, amount: f64, category: &str, date: &str) -> Transaction {
    Transaction {
        category: Some(category.to_string()),
        ..expense(id, amount, date)
    }
}

/// Expense with only a charity category
pub fn charity_expense(id: &str, amount: f64, charity_category: &str, date: &str) -> Transaction {
    Transaction {
        charity_category: Some(charity_category.to_string()),
        ..expense(id, amount, date)
    }
}
