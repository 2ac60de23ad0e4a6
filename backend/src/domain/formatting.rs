//! Display formatting for amounts, dates, month labels and list rows.
//!
//! Amounts are always Turkish lira; the locale only changes separators and
//! label language.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use shared::{AmountType, FormattedTransaction, Transaction, TransactionType};

use super::category_style;

/// Display language for labels and number separators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

pub const CURRENCY_SYMBOL: &str = "₺";

const TR_MONTHS: [&str; 12] = [
    "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
];
const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Short month name for `month` (1-12); out-of-range months yield "?"
pub fn month_label(month: u32, locale: Locale) -> &'static str {
    let names = match locale {
        Locale::Tr => &TR_MONTHS,
        Locale::En => &EN_MONTHS,
    };
    month
        .checked_sub(1)
        .and_then(|index| names.get(index as usize))
        .copied()
        .unwrap_or("?")
}

/// Format an amount as lira with two decimals: `₺1.234,56` (tr) or `₺1,234.56` (en)
pub fn format_currency(amount: f64, locale: Locale) -> String {
    let (group_separator, decimal_separator) = match locale {
        Locale::Tr => ('.', ','),
        Locale::En => (',', '.'),
    };

    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(group_separator);
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{}{}{}{:02}",
        sign, CURRENCY_SYMBOL, grouped, decimal_separator, fraction
    )
}

/// `15.01.2024` (tr) or `2024-01-15` (en), in UTC
pub fn format_date(date: &DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::Tr => format!("{:02}.{:02}.{}", date.day(), date.month(), date.year()),
        Locale::En => format!("{}-{:02}-{:02}", date.year(), date.month(), date.day()),
    }
}

/// Classify an amount for styling
pub fn classify_amount(transaction: &Transaction) -> AmountType {
    if transaction.amount == 0.0 {
        AmountType::Zero
    } else {
        match transaction.transaction_type {
            TransactionType::Income => AmountType::Positive,
            TransactionType::Expense => AmountType::Negative,
        }
    }
}

/// Build the list-row view of a transaction
pub fn format_transaction(
    transaction: &Transaction,
    locale: Locale,
    fallback_category: &str,
) -> FormattedTransaction {
    let category = transaction.classification(fallback_category);
    let sign = match transaction.transaction_type {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };

    FormattedTransaction {
        id: transaction.id.clone(),
        formatted_date: format_date(&transaction.date, locale),
        description: transaction.description.clone(),
        person: transaction.person.clone(),
        category: category.to_string(),
        icon: category_style::icon_for(category).to_string(),
        formatted_amount: format!("{}{}", sign, format_currency(transaction.amount, locale)),
        amount_type: classify_amount(transaction),
        raw_amount: transaction.amount,
    }
}
