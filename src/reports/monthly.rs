//! Monthly Summary Report
//!
//! One month against the month before: totals and per-category expense with
//! the change between them.

use std::collections::BTreeSet;
use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::display::report::{format_trend, money, section, separator, truncate};
use crate::error::PocketResult;
use crate::export::{write_rows, Report};
use crate::models::{Money, Transaction, YearMonth};
use crate::services::aggregate::{expense_for_month, sum_by_type};
use crate::services::trend::growth_percentage;
use crate::services::TypeTotals;
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCategoryRow {
    pub category: String,
    pub current: Money,
    pub previous: Money,
    /// Growth from previous to current; 100 when previous was 0
    pub change: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub month: YearMonth,
    pub current: TypeTotals,
    pub previous: TypeTotals,
    /// Growth of total expense on the previous month
    pub expense_change: f64,
    /// Largest current spend first
    pub categories: Vec<MonthlyCategoryRow>,
}

fn totals_for(transactions: &[Transaction], month: YearMonth) -> TypeTotals {
    let in_month: Vec<Transaction> = transactions
        .iter()
        .filter(|t| month.contains(t.date))
        .cloned()
        .collect();
    sum_by_type(&in_month)
}

impl MonthlyReport {
    pub fn build(transactions: &[Transaction], month: YearMonth) -> Self {
        let current = totals_for(transactions, month);
        let previous = totals_for(transactions, month.prev());

        let now = expense_for_month(transactions, month);
        let before = expense_for_month(transactions, month.prev());
        let names: BTreeSet<&String> = now.keys().chain(before.keys()).collect();

        let mut categories: Vec<MonthlyCategoryRow> = names
            .into_iter()
            .map(|category| {
                let current = now.get(category).copied().unwrap_or_default();
                let previous = before.get(category).copied().unwrap_or_default();
                MonthlyCategoryRow {
                    category: category.clone(),
                    current,
                    previous,
                    change: growth_percentage(current.as_f64(), previous.as_f64()),
                }
            })
            .collect();
        categories.sort_by(|a, b| b.current.cmp(&a.current).then(b.previous.cmp(&a.previous)));

        Self {
            month,
            expense_change: growth_percentage(current.expense.as_f64(), previous.expense.as_f64()),
            current,
            previous,
            categories,
        }
    }

    pub fn generate(storage: &Storage, month: YearMonth) -> PocketResult<Self> {
        info!(%month, "generating monthly report");
        Ok(Self::build(&storage.transactions.get_all()?, month))
    }
}

impl Report for MonthlyReport {
    fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str(&section(&format!("Monthly Summary: {}", self.month)));

        output.push_str(&format!(
            "{:<12} {:>14} {:>14}\n",
            "",
            self.month.to_string(),
            self.month.prev().to_string()
        ));
        for (label, now, before) in [
            ("Income", self.current.income, self.previous.income),
            ("Expenses", self.current.expense, self.previous.expense),
            ("Balance", self.current.balance, self.previous.balance),
        ] {
            output.push_str(&format!(
                "{:<12} {:>14} {:>14}\n",
                label,
                money(now, symbol),
                money(before, symbol)
            ));
        }
        output.push_str(&format!(
            "Spending change: {}\n",
            format_trend(self.expense_change)
        ));

        if self.categories.is_empty() {
            output.push_str("\nNo expenses in either month.\n");
            return output;
        }

        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>8}\n",
            "Category", "This month", "Last month", "Change"
        ));
        output.push_str(&separator(55));
        output.push('\n');
        for row in &self.categories {
            output.push_str(&format!(
                "{:<20} {:>12} {:>12} {:>8}\n",
                truncate(&row.category, 20),
                money(row.current, symbol),
                money(row.previous, symbol),
                format_trend(row.change)
            ));
        }

        output
    }

    fn export_csv<W: Write>(&self, writer: W) -> PocketResult<()> {
        #[derive(Serialize)]
        struct Row<'a> {
            category: &'a str,
            current: f64,
            previous: f64,
            change: f64,
        }

        let rows: Vec<Row> = self
            .categories
            .iter()
            .map(|r| Row {
                category: &r.category,
                current: r.current.as_f64(),
                previous: r.previous.as_f64(),
                change: r.change,
            })
            .collect();
        write_rows(&rows, writer)
    }
}
