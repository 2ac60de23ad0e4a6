//! Dashboard reporting for the charity tracker.
//!
//! `ReportingService` runs the aggregation functions over a transaction list
//! and packages the results the way the dashboard and history screens
//! consume them. It holds display preferences only; the data always comes in
//! as an argument so callers decide when to reload.

use chrono::{DateTime, FixedOffset};
use log::debug;
use serde::{Deserialize, Serialize};
use shared::{DashboardSummary, FormattedTransaction, Transaction, TransactionType};

use super::aggregation::{self, DEFAULT_MONTH_WINDOW, OTHER_CATEGORY, ZAKAT_CATEGORY};
use super::category_style;
use super::formatting::{self, Locale};

/// Display preferences for reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Number of trailing months in the trend chart
    pub month_window: usize,
    pub locale: Locale,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            month_window: DEFAULT_MONTH_WINDOW,
            locale: Locale::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportingService {
    config: ReportingConfig,
}

impl ReportingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ReportingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportingConfig {
        &self.config
    }

    /// Compute every dashboard figure for `transactions` as of `reference`
    pub fn dashboard(
        &self,
        transactions: &[Transaction],
        reference: &DateTime<FixedOffset>,
    ) -> DashboardSummary {
        let top_category = aggregation::top_category(transactions);
        let distribution = aggregation::category_distribution(transactions);
        let distribution_total = distribution.iter().map(|slice| slice.value).sum();

        let summary = DashboardSummary {
            total_income: aggregation::total_by_type(transactions, TransactionType::Income),
            total_expense: aggregation::total_by_type(transactions, TransactionType::Expense),
            net_balance: aggregation::net_balance(transactions),
            top_category_icon: category_style::icon_for(&top_category.category).to_string(),
            top_category,
            monthly: aggregation::monthly_series(
                transactions,
                reference,
                self.config.month_window,
                self.config.locale,
            ),
            distribution,
            distribution_total,
            current_month_net: aggregation::current_month_net(transactions, reference),
            highest_expense: aggregation::highest_expense(transactions).ok(),
            average_expense: aggregation::average_expense(transactions).ok(),
            active_category_count: aggregation::active_category_count(transactions),
            zakat_total: aggregation::total_for_classification(transactions, ZAKAT_CATEGORY),
        };

        debug!(
            "Dashboard over {} transactions: net={:.2}, top={} ({:.2})",
            transactions.len(),
            summary.net_balance,
            summary.top_category.category,
            summary.top_category.amount
        );
        summary
    }

    /// Rows for the transaction history list, in the order given
    pub fn format_transactions(&self, transactions: &[Transaction]) -> Vec<FormattedTransaction> {
        transactions
            .iter()
            .map(|tx| formatting::format_transaction(tx, self.config.locale, OTHER_CATEGORY))
            .collect()
    }

    /// Currency string in the configured locale
    pub fn format_amount(&self, amount: f64) -> String {
        formatting::format_currency(amount, self.config.locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::{categorized_expense, charity_expense, income};

    fn reference() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2024-02-10T12:00:00+03:00").unwrap()
    }

    fn transactions() -> Vec<Transaction> {
        vec![
            charity_expense("3", 60.0, "Zekat", "2024-02-01T10:00:00Z"),
            categorized_expense("2", 40.0, "Ulaşım", "2024-01-20T10:00:00Z"),
            income("1", 100.0, "2024-01-15T10:00:00Z"),
        ]
    }

    #[test]
    fn test_dashboard_summary() {
        let summary = ReportingService::new().dashboard(&transactions(), &reference());

        assert_eq!(summary.total_income, 100.0);
        assert_eq!(summary.total_expense, 100.0);
        assert_eq!(summary.net_balance, 0.0);
        assert_eq!(summary.top_category.category, "Zekat");
        assert_eq!(summary.top_category_icon, "hand-heart");
        assert_eq!(summary.monthly.labels.len(), 6);
        assert_eq!(summary.monthly.expense[5], 60.0);
        assert_eq!(summary.distribution.len(), 2);
        assert_eq!(summary.distribution_total, 100.0);
        assert_eq!(summary.current_month_net, -60.0);
        assert_eq!(summary.highest_expense, Some(60.0));
        assert_eq!(summary.average_expense, Some(50.0));
        assert_eq!(summary.active_category_count, 3);
        assert_eq!(summary.zakat_total, 60.0);
    }

    #[test]
    fn test_dashboard_without_transactions() {
        let summary = ReportingService::new().dashboard(&[], &reference());

        assert_eq!(summary.net_balance, 0.0);
        assert_eq!(summary.top_category.category, "Other");
        assert_eq!(summary.top_category_icon, category_style::FALLBACK_ICON);
        assert_eq!(summary.highest_expense, None);
        assert_eq!(summary.average_expense, None);
        assert!(summary.distribution.is_empty());
        assert_eq!(summary.monthly.income, vec![0.0; 6]);
    }

    #[test]
    fn test_month_window_and_locale_come_from_config() {
        let service = ReportingService::with_config(ReportingConfig {
            month_window: 3,
            locale: Locale::En,
        });
        let summary = service.dashboard(&transactions(), &reference());

        assert_eq!(summary.monthly.labels, vec!["Dec", "Jan", "Feb"]);
        assert_eq!(service.format_amount(1500.0), "₺1,500.00");
    }

    #[test]
    fn test_format_transactions_keeps_order() {
        let rows = ReportingService::new().format_transactions(&transactions());
        let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
        assert_eq!(rows[0].formatted_amount, "-₺60,00");
    }
}
