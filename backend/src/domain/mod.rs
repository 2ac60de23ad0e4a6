//! # Domain Module
//!
//! Business logic for the charity tracker:
//!
//! - **aggregation**: pure functions deriving dashboard figures from a
//!   transaction list
//! - **category_style**: the one lookup table for category colors and icons
//! - **formatting**: currency, date and month-label formatting
//! - **reporting_service**: assembles dashboard and history views
//! - **transaction_service**: validates form input and records/deletes
//!   transactions through the storage layer

pub mod aggregation;
pub mod category_style;
pub mod formatting;
pub mod reporting_service;
pub mod transaction_service;

pub use aggregation::CategoryTotals;
pub use formatting::Locale;
pub use reporting_service::{ReportingConfig, ReportingService};
pub use transaction_service::TransactionService;
