//! Pure aggregation functions behind the dashboard.
//!
//! Every function takes the transaction list by reference and returns a fresh
//! value; nothing here touches storage or the clock. Functions that depend on
//! "now" take an explicit reference date. All of them are single linear scans,
//! plus one sort in `category_distribution`.
//!
//! Category-keyed aggregations group by `Transaction::classification`, so a
//! transaction with neither `category` nor `charity_category` is counted under
//! [`OTHER_CATEGORY`].

use chrono::{DateTime, Datelike, FixedOffset};
use shared::{CategorySlice, MonthlySeries, TopCategory, Transaction, TransactionType};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::category_style;
use super::formatting::{month_label, Locale};
use crate::error::AggregationError;

/// Label for transactions without any category
pub const OTHER_CATEGORY: &str = "Other";

/// Months shown in the dashboard's trend chart
pub const DEFAULT_MONTH_WINDOW: usize = 6;

/// Charity category whose running total the dashboard highlights
pub const ZAKAT_CATEGORY: &str = "Zekat";

/// Expense totals per category, in first-encountered order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
}

impl CategoryTotals {
    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all categories
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }
}

/// Calendar (year, zero-based month) of `date` as seen from `offset`
fn calendar_month<Tz: chrono::TimeZone>(date: &DateTime<Tz>, offset: &FixedOffset) -> (i32, u32) {
    let local = date.with_timezone(offset);
    (local.year(), local.month0())
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Income and expense per month over the `month_count` months ending with
/// `reference`'s month, oldest first. Empty months are zero.
///
/// Transaction dates are bucketed in the UTC offset of `reference`.
pub fn monthly_series(
    transactions: &[Transaction],
    reference: &DateTime<FixedOffset>,
    month_count: usize,
    locale: Locale,
) -> MonthlySeries {
    let offset = reference.offset();
    let anchor = i64::from(reference.year()) * 12 + i64::from(reference.month0());

    let months: Vec<(i32, u32)> = (0..month_count as i64)
        .rev()
        .map(|back| {
            let index = anchor - back;
            (index.div_euclid(12) as i32, index.rem_euclid(12) as u32)
        })
        .collect();

    let bucket_of: HashMap<(i32, u32), usize> = months
        .iter()
        .enumerate()
        .map(|(position, month)| (*month, position))
        .collect();

    let mut income = vec![0.0; month_count];
    let mut expense = vec![0.0; month_count];

    for transaction in transactions {
        if let Some(&bucket) = bucket_of.get(&calendar_month(&transaction.date, offset)) {
            match transaction.transaction_type {
                TransactionType::Income => income[bucket] += transaction.amount,
                TransactionType::Expense => expense[bucket] += transaction.amount,
            }
        }
    }

    MonthlySeries {
        labels: months
            .iter()
            .map(|(_, month0)| month_label(month0 + 1, locale).to_string())
            .collect(),
        income,
        expense,
    }
}

/// Sum of expense amounts per category
pub fn category_totals(transactions: &[Transaction]) -> CategoryTotals {
    let mut entries: Vec<(String, f64)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for transaction in transactions.iter().filter(|tx| tx.is_expense()) {
        let category = transaction.classification(OTHER_CATEGORY);
        match positions.get(category) {
            Some(&position) => entries[position].1 += transaction.amount,
            None => {
                positions.insert(category, entries.len());
                entries.push((category.to_string(), transaction.amount));
            }
        }
    }

    CategoryTotals { entries }
}

/// Expense distribution for the pie chart, largest first.
///
/// Ties keep first-encountered order. When the total is zero every
/// percentage is zero.
pub fn category_distribution(transactions: &[Transaction]) -> Vec<CategorySlice> {
    let totals = category_totals(transactions);
    let grand_total = totals.total();

    let mut slices: Vec<CategorySlice> = totals
        .iter()
        .map(|(name, value)| CategorySlice {
            name: name.to_string(),
            value,
            percentage: if grand_total > 0.0 {
                round_to_tenth(value / grand_total * 100.0)
            } else {
                0.0
            },
            color: category_style::color_for(name).to_string(),
        })
        .collect();

    // Stable sort keeps insertion order for equal values
    slices.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    slices
}

/// Category with the highest expense total; the first one wins ties.
/// `{"Other", 0}` when there are no expenses.
pub fn top_category(transactions: &[Transaction]) -> TopCategory {
    let totals = category_totals(transactions);

    let mut top: Option<(&str, f64)> = None;
    for (name, total) in totals.iter() {
        match top {
            Some((_, best)) if total <= best => {}
            _ => top = Some((name, total)),
        }
    }

    let (category, amount) = top.unwrap_or((OTHER_CATEGORY, 0.0));
    TopCategory {
        category: category.to_string(),
        amount,
    }
}

/// Income minus expense over all transactions
pub fn net_balance(transactions: &[Transaction]) -> f64 {
    transactions.iter().map(Transaction::signed_amount).sum()
}

pub fn total_by_type(transactions: &[Transaction], transaction_type: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.transaction_type == transaction_type)
        .map(|tx| tx.amount)
        .sum()
}

/// Net balance restricted to `reference`'s calendar month
pub fn current_month_net(transactions: &[Transaction], reference: &DateTime<FixedOffset>) -> f64 {
    let offset = reference.offset();
    let month = calendar_month(reference, offset);
    transactions
        .iter()
        .filter(|tx| calendar_month(&tx.date, offset) == month)
        .map(Transaction::signed_amount)
        .sum()
}

/// Largest single expense
pub fn highest_expense(transactions: &[Transaction]) -> Result<f64, AggregationError> {
    transactions
        .iter()
        .filter(|tx| tx.is_expense())
        .map(|tx| tx.amount)
        .fold(None, |max: Option<f64>, amount| {
            Some(max.map_or(amount, |current| current.max(amount)))
        })
        .ok_or(AggregationError::EmptyInput("highest expense"))
}

/// Mean amount of the expense transactions
pub fn average_expense(transactions: &[Transaction]) -> Result<f64, AggregationError> {
    let (count, total) = transactions
        .iter()
        .filter(|tx| tx.is_expense())
        .fold((0usize, 0.0), |(count, total), tx| (count + 1, total + tx.amount));
    if count == 0 {
        return Err(AggregationError::EmptyInput("average expense"));
    }
    Ok(total / count as f64)
}

/// Number of distinct categories across all transactions, income included.
///
/// Unclassified transactions count as one group of their own, apart from any
/// transaction explicitly labelled "Other".
pub fn active_category_count(transactions: &[Transaction]) -> usize {
    transactions
        .iter()
        .map(Transaction::explicit_classification)
        .collect::<HashSet<_>>()
        .len()
}

/// Sum of every transaction tagged `name` as either category or charity
/// category, regardless of type
pub fn total_for_classification(transactions: &[Transaction], name: &str) -> f64 {
    transactions
        .iter()
        .filter(|tx| {
            tx.category.as_deref() == Some(name) || tx.charity_category.as_deref() == Some(name)
        })
        .map(|tx| tx.amount)
        .sum()
}

/// Relative change from `previous` to `current` in percent, one decimal.
/// `None` when there is no change or no previous value to compare against.
pub fn percentage_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 || current == previous {
        return None;
    }
    Some(round_to_tenth((current - previous) / previous.abs() * 100.0))
}
