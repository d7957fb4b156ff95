//! Spending insights report
//!
//! The main analytics view over a period: income/expense totals, the monthly
//! series, per-category totals with their trend, outlier expenses and
//! savings tips.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::config::{Settings, Thresholds};
use crate::display::report::{format_bar, format_trend, money, section, truncate};
use crate::error::PocketResult;
use crate::export::{write_rows, Report};
use crate::models::{DateRange, Money, PeriodToken, Transaction, TransactionType};
use crate::services::{
    category_aggregates, detect_outliers, filter_range, suggest_savings, sum_by_category,
    sum_by_month, sum_by_type, CategoryAggregate, MonthlyAggregate, Outlier, PeriodResolver,
    SavingsSuggestion, TypeTotals,
};
use crate::storage::Storage;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, Serialize)]
pub struct InsightsReport {
    pub period: PeriodToken,
    pub range: DateRange,
    pub transaction_count: usize,
    pub totals: TypeTotals,
    /// Ascending by month
    pub monthly: Vec<MonthlyAggregate>,
    /// Expense categories, largest total first
    pub expense_categories: Vec<CategoryAggregate>,
    /// Income categories, largest total first
    pub income_categories: Vec<CategoryAggregate>,
    pub outliers: Vec<Outlier>,
    pub savings: Vec<SavingsSuggestion>,
}

impl InsightsReport {
    /// Assemble the report from a transaction snapshot
    pub fn build(
        transactions: &[Transaction],
        period: PeriodToken,
        range: DateRange,
        thresholds: &Thresholds,
    ) -> Self {
        let in_range = filter_range(transactions, &range);
        let expenses = sum_by_category(&in_range, TransactionType::Expense);
        let income = sum_by_category(&in_range, TransactionType::Income);

        Self {
            period,
            range,
            transaction_count: in_range.len(),
            totals: sum_by_type(&in_range),
            monthly: sum_by_month(&in_range),
            expense_categories: category_aggregates(&expenses),
            income_categories: category_aggregates(&income),
            outliers: detect_outliers(&in_range, thresholds.outlier_sigma, thresholds.outlier_limit),
            savings: suggest_savings(&expenses, thresholds),
        }
    }

    /// Generate from storage for the given period
    pub fn generate(
        storage: &Storage,
        resolver: &PeriodResolver,
        period: PeriodToken,
        settings: &Settings,
    ) -> PocketResult<Self> {
        let range = resolver.resolve(period);
        info!(period = %period, %range, "generating insights report");
        let transactions = storage.transactions.get_all()?;
        Ok(Self::build(&transactions, period, range, &settings.thresholds))
    }
}

fn category_lines(output: &mut String, categories: &[CategoryAggregate], symbol: &str) {
    let max = categories.first().map(|c| c.total.as_f64()).unwrap_or(0.0);
    for cat in categories {
        output.push_str(&format!(
            "  {:<20} {:>12} {:>5} {:>7}  {}\n",
            truncate(&cat.category, 20),
            money(cat.total, symbol),
            cat.count,
            format_trend(cat.trend),
            format_bar(cat.total.as_f64(), max, BAR_WIDTH)
        ));
    }
}

impl Report for InsightsReport {
    fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&section(&format!(
            "Spending Insights: {} ({})",
            self.period, self.range
        )));
        output.push_str(&format!("Income:       {:>14}\n", money(self.totals.income, symbol)));
        output.push_str(&format!("Expenses:     {:>14}\n", money(self.totals.expense, symbol)));
        output.push_str(&format!("Balance:      {:>14}\n", money(self.totals.balance, symbol)));
        output.push_str(&format!("Transactions: {:>14}\n", self.transaction_count));

        if self.transaction_count == 0 {
            output.push_str("\nNo transactions in this period.\n");
            return output;
        }

        if !self.monthly.is_empty() {
            output.push('\n');
            output.push_str(&section("By Month"));
            let max = self
                .monthly
                .iter()
                .map(|m| m.expense.as_f64())
                .fold(0.0, f64::max);
            for month in &self.monthly {
                output.push_str(&format!(
                    "  {}  in {:>12}  out {:>12}  {}\n",
                    month.month,
                    money(month.income, symbol),
                    money(month.expense, symbol),
                    format_bar(month.expense.as_f64(), max, BAR_WIDTH)
                ));
            }
        }

        if !self.expense_categories.is_empty() {
            output.push('\n');
            output.push_str(&section("Expenses by Category"));
            category_lines(&mut output, &self.expense_categories, symbol);
        }

        if !self.income_categories.is_empty() {
            output.push('\n');
            output.push_str(&section("Income by Category"));
            category_lines(&mut output, &self.income_categories, symbol);
        }

        if !self.outliers.is_empty() {
            output.push('\n');
            output.push_str(&section("Unusual Expenses"));
            for outlier in &self.outliers {
                let txn = &outlier.transaction;
                output.push_str(&format!(
                    "  {}  {:<20} {:>12}  (category avg {})\n",
                    txn.date,
                    truncate(&txn.category, 20),
                    money(txn.amount, symbol),
                    money(Money::from_decimal(outlier.category_mean), symbol)
                ));
            }
        }

        if !self.savings.is_empty() {
            output.push('\n');
            output.push_str(&section("Savings Opportunities"));
            for tip in &self.savings {
                output.push_str(&format!(
                    "  Spending less on {} could save about {} a year\n",
                    tip.category,
                    money(tip.projected_savings, symbol)
                ));
            }
            output.push_str(&format!(
                "  (annualised from the {} total)\n",
                self.range
            ));
        }

        output
    }

    fn export_csv<W: Write>(&self, writer: W) -> PocketResult<()> {
        #[derive(Serialize)]
        struct Row<'a> {
            #[serde(rename = "type")]
            kind: &'static str,
            category: &'a str,
            total: f64,
            count: usize,
            average: f64,
            trend: f64,
        }

        let rows: Vec<Row> = self
            .expense_categories
            .iter()
            .map(|c| (TransactionType::Expense, c))
            .chain(self.income_categories.iter().map(|c| (TransactionType::Income, c)))
            .map(|(kind, c)| Row {
                kind: kind.as_str(),
                category: &c.category,
                total: c.total.as_f64(),
                count: c.count,
                average: c.average,
                trend: c.trend,
            })
            .collect();
        write_rows(&rows, writer)
    }
}
