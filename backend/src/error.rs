//! Error types for the storage, reporting and transaction layers.

use shared::ValidationError;
use thiserror::Error;

/// Failures talking to the key-value store or (de)serialising its contents
#[derive(Debug, Error)]
pub enum StorageError {
    /// The stored value exists but could not be read back as a transaction list
    #[error("failed to read stored transactions under '{key}': {reason}")]
    Read { key: String, reason: String },

    /// Persisting the transaction list failed; the write did not happen
    #[error("failed to write transactions under '{key}': {reason}")]
    Write { key: String, reason: String },

    #[error("failed to serialize transactions: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("a transaction with id '{0}' already exists")]
    DuplicateId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Aggregations that have no meaningful value for their input
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error("no qualifying transactions for {0}")]
    EmptyInput(&'static str),
}

/// Errors surfaced by `TransactionService` to the presentation layer
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid transaction: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_problem() {
        let err = ServiceError::Validation(vec![
            ValidationError::EmptyAmount,
            ValidationError::MissingDescriptionAndPerson,
        ]);
        assert_eq!(
            err.to_string(),
            "invalid transaction: Amount is required; A description or a person is required"
        );
    }

    #[test]
    fn storage_errors_convert_into_service_errors() {
        let err: ServiceError = StorageError::DuplicateId("transaction::income::1".into()).into();
        assert!(matches!(err, ServiceError::Storage(StorageError::DuplicateId(_))));
    }
}
