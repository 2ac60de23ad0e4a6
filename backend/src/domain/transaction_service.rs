//! Transaction recording for the charity tracker.
//!
//! `TransactionService` is what the add/delete screens talk to. It validates
//! raw form input, turns it into a `Transaction` (id, capped date, trimmed
//! text) and hands it to the repository. It never updates anything
//! optimistically: the caller gets the stored transaction back only after
//! the write went through.

use chrono::{DateTime, Utc};
use log::{info, warn};
use shared::{CreateTransactionRequest, Transaction, TransactionType, ValidationError, ValidationResult};
use std::sync::Arc;

use crate::error::ServiceError;
use crate::storage::TransactionStorage;

/// Longest description the form accepts, in characters
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

pub struct TransactionService<R: TransactionStorage> {
    repository: Arc<R>,
}

impl<R: TransactionStorage> Clone for TransactionService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// Digits with at most one decimal point, as the amount field allows
fn is_amount_shaped(raw: &str) -> bool {
    raw.chars().all(|c| c.is_ascii_digit() || c == '.') && raw.matches('.').count() <= 1
}

/// Time-based id; bumps the millisecond until it is unused in `existing`
fn next_id(existing: &[Transaction], transaction_type: TransactionType, now: DateTime<Utc>) -> String {
    let mut millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    loop {
        let id = Transaction::generate_id(transaction_type, millis);
        if !existing.iter().any(|tx| tx.id == id) {
            return id;
        }
        millis += 1;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl<R: TransactionStorage> TransactionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Validate raw form input without touching storage
    pub fn validate(request: &CreateTransactionRequest) -> ValidationResult {
        let mut errors = Vec::new();
        let mut cleaned_amount = None;

        let raw_amount = request.amount.trim();
        if raw_amount.is_empty() {
            errors.push(ValidationError::EmptyAmount);
        } else if !is_amount_shaped(raw_amount) {
            errors.push(ValidationError::InvalidAmount(raw_amount.to_string()));
        } else {
            match raw_amount.parse::<f64>() {
                Ok(amount) if amount.is_finite() => cleaned_amount = Some(amount),
                _ => errors.push(ValidationError::InvalidAmount(raw_amount.to_string())),
            }
        }

        if request.description.trim().is_empty() && request.person.trim().is_empty() {
            errors.push(ValidationError::MissingDescriptionAndPerson);
        }

        let description_length = request.description.trim().chars().count();
        if description_length > MAX_DESCRIPTION_LENGTH {
            errors.push(ValidationError::DescriptionTooLong(description_length));
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            cleaned_amount,
        }
    }

    /// Validate `request`, build the transaction and store it.
    ///
    /// Dates after `now` are clamped to `now`. Returns the stored transaction.
    pub async fn create_transaction(
        &self,
        request: CreateTransactionRequest,
        now: DateTime<Utc>,
    ) -> Result<Transaction, ServiceError> {
        let validation = Self::validate(&request);
        let amount = match (validation.is_valid, validation.cleaned_amount) {
            (true, Some(amount)) => amount,
            _ => {
                warn!("Rejected transaction input: {:?}", validation.errors);
                return Err(ServiceError::Validation(validation.errors));
            }
        };

        let mut date = request.date.unwrap_or(now);
        if date > now {
            warn!("Transaction date {} is in the future, using {}", date, now);
            date = now;
        }

        let draft = Transaction {
            id: String::new(),
            amount,
            description: request.description.trim().to_string(),
            person: request.person.trim().to_string(),
            category: non_blank(request.category),
            charity_category: non_blank(request.charity_category),
            transaction_type: request.transaction_type,
            date,
        };

        // The id is picked under the repository's write lock
        let transaction = self
            .repository
            .append_with(move |existing| Transaction {
                id: next_id(existing, draft.transaction_type, now),
                ..draft
            })
            .await?;
        info!(
            "Recorded {} of {:.2} as {}",
            transaction.transaction_type, transaction.amount, transaction.id
        );
        Ok(transaction)
    }

    /// Delete a transaction; returns whether one was removed
    pub async fn delete_transaction(&self, id: &str) -> Result<bool, ServiceError> {
        let removed = self.repository.take(id).await?;
        if removed.is_some() {
            info!("Deleted transaction {}", id);
        }
        Ok(removed.is_some())
    }

    /// All transactions, most recently recorded first
    pub async fn list_transactions(&self) -> Vec<Transaction> {
        self.repository.snapshot().await
    }

    /// Transactions of one type, most recently recorded first
    pub async fn list_by_type(&self, transaction_type: TransactionType) -> Vec<Transaction> {
        self.repository
            .snapshot()
            .await
            .into_iter()
            .filter(|tx| tx.transaction_type == transaction_type)
            .collect()
    }

    pub async fn get_transaction(&self, id: &str) -> Option<Transaction> {
        self.repository.get(id).await
    }

    /// Re-read storage into the repository snapshot
    pub async fn reload(&self) -> Vec<Transaction> {
        self.repository.reload().await
    }
}
