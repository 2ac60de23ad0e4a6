use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single recorded income or expense event.
///
/// The JSON layout is the persisted format of the transaction list, so field
/// names follow the stored camelCase keys (`charityCategory`, `type`).
/// Transaction ID in format: "transaction::<income|expense>::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Non-negative amount; the sign comes from `transaction_type`
    pub amount: f64,
    pub description: String,
    /// Person the money came from or went to
    pub person: String,
    /// General-purpose classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Charity-specific classification (Zekat, Sadaka, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charity_category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// User-selected timestamp (RFC 3339), never in the future
    pub date: DateTime<Utc>,
}

/// Direction of a transaction; decides its sign in balance computations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Transaction {
    /// Generate transaction ID from type and timestamp
    pub fn generate_id(transaction_type: TransactionType, epoch_millis: u64) -> String {
        format!("transaction::{}::{}", transaction_type, epoch_millis)
    }

    /// Parse transaction ID to extract components
    pub fn parse_id(id: &str) -> Result<(TransactionType, u64), TransactionIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 3 || parts[0] != "transaction" {
            return Err(TransactionIdError::InvalidFormat);
        }

        let transaction_type = match parts[1] {
            "income" => TransactionType::Income,
            "expense" => TransactionType::Expense,
            _ => return Err(TransactionIdError::InvalidType),
        };

        let epoch_millis = parts[2]
            .parse::<u64>()
            .map_err(|_| TransactionIdError::InvalidTimestamp)?;

        Ok((transaction_type, epoch_millis))
    }

    /// Extract epoch timestamp from transaction ID
    pub fn extract_timestamp(&self) -> Result<u64, TransactionIdError> {
        Self::parse_id(&self.id).map(|(_, timestamp)| timestamp)
    }

    /// The label this transaction is grouped under: `category`, then
    /// `charity_category`, then `fallback`. Empty strings count as absent.
    pub fn classification<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.explicit_classification().unwrap_or(fallback)
    }

    /// `category`, then `charity_category`; `None` when neither is set
    pub fn explicit_classification(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| self.charity_category.as_deref().filter(|c| !c.is_empty()))
    }

    /// Amount with income positive and expense negative
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionIdError {
    InvalidFormat,
    InvalidType,
    InvalidTimestamp,
}

impl fmt::Display for TransactionIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionIdError::InvalidFormat => write!(f, "Invalid transaction ID format"),
            TransactionIdError::InvalidType => write!(f, "Invalid transaction type"),
            TransactionIdError::InvalidTimestamp => write!(f, "Invalid timestamp in transaction ID"),
        }
    }
}

impl std::error::Error for TransactionIdError {}

/// Display metadata for a category offered by the transaction form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// Which pick list a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Categories offered when recording income
    Income,
    /// General expense categories
    Regular,
    /// Donation-type expense categories
    Charity,
}

/// Trailing monthly income/expense series, oldest month first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub labels: Vec<String>,
    pub income: Vec<f64>,
    pub expense: Vec<f64>,
}

/// One slice of the expense distribution chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySlice {
    pub name: String,
    pub value: f64,
    /// Share of all expenses, rounded to one decimal
    pub percentage: f64,
    pub color: String,
}

/// Category with the largest expense total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCategory {
    pub category: String,
    pub amount: f64,
}

/// Everything the dashboard screen renders, computed in one pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub net_balance: f64,
    pub top_category: TopCategory,
    pub top_category_icon: String,
    pub monthly: MonthlySeries,
    pub distribution: Vec<CategorySlice>,
    /// Sum of all slice values
    pub distribution_total: f64,
    pub current_month_net: f64,
    /// `None` when there are no expenses
    pub highest_expense: Option<f64>,
    /// `None` when there are no expenses
    pub average_expense: Option<f64>,
    pub active_category_count: usize,
    pub zakat_total: f64,
}

/// Raw form input for a new transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTransactionRequest {
    /// Amount as typed (digits with an optional decimal point)
    pub amount: String,
    pub description: String,
    pub person: String,
    pub transaction_type: TransactionType,
    pub category: Option<String>,
    pub charity_category: Option<String>,
    /// Optional date override - uses current time if not provided
    pub date: Option<DateTime<Utc>>,
}

/// Validation result for transaction form input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub cleaned_amount: Option<f64>,
}

/// Specific validation errors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ValidationError {
    EmptyAmount,
    InvalidAmount(String),
    MissingDescriptionAndPerson,
    DescriptionTooLong(usize),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyAmount => write!(f, "Amount is required"),
            ValidationError::InvalidAmount(raw) => write!(f, "Invalid amount: {}", raw),
            ValidationError::MissingDescriptionAndPerson => {
                write!(f, "A description or a person is required")
            }
            ValidationError::DescriptionTooLong(len) => {
                write!(f, "Description is too long ({} characters, max 256)", len)
            }
        }
    }
}

/// Represents a formatted transaction for display purposes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormattedTransaction {
    pub id: String,
    pub formatted_date: String,
    pub description: String,
    pub person: String,
    pub category: String,
    pub icon: String,
    pub formatted_amount: String,
    pub amount_type: AmountType,
    pub raw_amount: f64,
}

/// Type of transaction amount for styling and display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AmountType {
    Positive,
    Negative,
    Zero,
}
