//! # Charity Tracker Backend
//!
//! Non-UI logic for the charity tracker: income and expense records with a
//! category, an amount, a date and the person involved, plus the dashboard
//! figures derived from them.
//!
//! ## Architecture
//!
//! ```text
//! Presentation (screens, charts, forms)
//!     ↓
//! Domain (TransactionService, ReportingService, aggregation)
//!     ↓
//! Storage (TransactionRepository over a KeyValueStore)
//! ```
//!
//! The whole collection is one JSON array under one store key. Screens call
//! `TransactionService` to record or delete, then read the repository
//! snapshot and render `ReportingService` output. Nothing reloads behind the
//! caller's back; `reload()` is explicit.

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use log::info;
use shared::{Category, CategoryKind, DashboardSummary, FormattedTransaction, TransactionType};
use std::sync::Arc;

pub use config::AppConfig;
pub use domain::{ReportingService, TransactionService};
pub use error::{AggregationError, ServiceError, StorageError};
pub use storage::{FileStore, KeyValueStore, MemoryStore, TransactionRepository, TransactionStorage};

/// Wires storage and services together from an `AppConfig`
pub struct Backend<S: KeyValueStore = FileStore> {
    pub config: AppConfig,
    pub transaction_service: TransactionService<TransactionRepository<S>>,
    pub reporting_service: ReportingService,
}

impl Backend<FileStore> {
    /// Open the file store in the configured data directory
    pub async fn new(config: AppConfig) -> Result<Self> {
        let store = FileStore::new(&config.data_directory).with_context(|| {
            format!("Failed to open data directory {:?}", config.data_directory)
        })?;
        Ok(Self::with_store(config, Arc::new(store)).await)
    }
}

impl<S: KeyValueStore> Backend<S> {
    /// Build the backend over an existing store
    pub async fn with_store(config: AppConfig, store: Arc<S>) -> Self {
        info!("Opening transactions under key '{}'", config.storage_key);
        let repository = TransactionRepository::open(store, config.storage_key.clone()).await;
        let transaction_service = TransactionService::new(Arc::new(repository));
        let reporting_service = ReportingService::with_config(config.reporting());

        Self {
            config,
            transaction_service,
            reporting_service,
        }
    }

    /// Dashboard figures over the current snapshot as of `reference`
    pub async fn dashboard(&self, reference: &DateTime<FixedOffset>) -> DashboardSummary {
        let transactions = self.transaction_service.list_transactions().await;
        self.reporting_service.dashboard(&transactions, reference)
    }

    /// Dashboard figures as of the local current time
    pub async fn dashboard_now(&self) -> DashboardSummary {
        let now = Local::now();
        self.dashboard(&now.with_timezone(now.offset())).await
    }

    /// History rows, optionally limited to one type
    pub async fn history(&self, transaction_type: Option<TransactionType>) -> Vec<FormattedTransaction> {
        let transactions = match transaction_type {
            Some(transaction_type) => self.transaction_service.list_by_type(transaction_type).await,
            None => self.transaction_service.list_transactions().await,
        };
        self.reporting_service.format_transactions(&transactions)
    }

    /// Categories the form offers for `kind`
    pub fn categories(&self, kind: CategoryKind) -> Vec<Category> {
        domain::category_style::catalog(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Locale;
    use crate::storage::test_utils::{at, init_logging};
    use shared::CreateTransactionRequest;

    fn request(amount: &str, transaction_type: TransactionType, category: Option<&str>) -> CreateTransactionRequest {
        CreateTransactionRequest {
            amount: amount.to_string(),
            description: "Yardım".to_string(),
            person: "Zeynep".to_string(),
            transaction_type,
            category: category.map(str::to_string),
            charity_category: None,
            date: None,
        }
    }

    fn reference() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-03-15T12:00:00+03:00").unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_over_memory_store() {
        init_logging();
        let backend = Backend::with_store(AppConfig::default(), Arc::new(MemoryStore::new())).await;
        let now = at("2024-03-10T09:00:00Z");

        backend
            .transaction_service
            .create_transaction(request("500", TransactionType::Income, None), now)
            .await
            .unwrap();
        backend
            .transaction_service
            .create_transaction(request("120.5", TransactionType::Expense, Some("Gıda")), now)
            .await
            .unwrap();

        let summary = backend.dashboard(&reference()).await;
        assert_eq!(summary.total_income, 500.0);
        assert_eq!(summary.total_expense, 120.5);
        assert_eq!(summary.net_balance, 379.5);
        assert_eq!(summary.current_month_net, 379.5);
        assert_eq!(summary.top_category.category, "Gıda");
        assert_eq!(summary.monthly.labels.len(), 6);
        assert_eq!(summary.monthly.labels.last().map(String::as_str), Some("Mar"));
    }

    #[tokio::test]
    async fn test_history_filters_by_type() {
        let config = AppConfig {
            locale: Locale::En,
            ..AppConfig::default()
        };
        let backend = Backend::with_store(config, Arc::new(MemoryStore::new())).await;
        let now = at("2024-03-10T09:00:00Z");

        backend
            .transaction_service
            .create_transaction(request("10", TransactionType::Income, None), now)
            .await
            .unwrap();
        backend
            .transaction_service
            .create_transaction(request("4", TransactionType::Expense, None), now)
            .await
            .unwrap();

        assert_eq!(backend.history(None).await.len(), 2);
        let expenses = backend.history(Some(TransactionType::Expense)).await;
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].raw_amount, 4.0);
        assert_eq!(expenses[0].category, "Other");
    }

    #[tokio::test]
    async fn test_new_opens_data_directory() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig {
            data_directory: temp_dir.path().join("data"),
            ..AppConfig::default()
        };

        let backend = Backend::new(config).await.unwrap();
        assert!(temp_dir.path().join("data").is_dir());
        assert!(backend.transaction_service.list_transactions().await.is_empty());
        assert!(!backend.categories(CategoryKind::Charity).is_empty());
    }
}
