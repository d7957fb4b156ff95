//! Budget Status Report
//!
//! This month's spend against monthly budgets and standing category limits,
//! plus the alerts that need attention.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::config::{Settings, Thresholds};
use crate::display::report::{format_bar, format_percentage, money, section, truncate};
use crate::error::PocketResult;
use crate::export::{write_rows, Report};
use crate::models::{Budget, CategoryLimit, Transaction, YearMonth};
use crate::services::{Alert, BudgetTracker, CeilingState, CeilingStatus};
use crate::storage::Storage;

#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatusReport {
    pub month: YearMonth,
    /// Budgets planned for this month
    pub budgets: Vec<CeilingStatus>,
    /// Standing limits
    pub limits: Vec<CeilingStatus>,
    /// Highest percentage first
    pub alerts: Vec<Alert>,
}

impl BudgetStatusReport {
    pub fn build(
        month: YearMonth,
        budgets: &[Budget],
        limits: &[CategoryLimit],
        transactions: &[Transaction],
        thresholds: &Thresholds,
    ) -> Self {
        let tracker = BudgetTracker::with_thresholds(month, thresholds);
        let budget_status = tracker.status(budgets, transactions);
        let limit_status = tracker.status(limits, transactions);

        let all: Vec<CeilingStatus> = budget_status
            .iter()
            .chain(limit_status.iter())
            .cloned()
            .collect();
        let alerts = tracker.alerts(&all, transactions);

        Self {
            month,
            budgets: budget_status,
            limits: limit_status,
            alerts,
        }
    }

    pub fn generate(storage: &Storage, month: YearMonth, settings: &Settings) -> PocketResult<Self> {
        info!(%month, "generating budget status report");
        Ok(Self::build(
            month,
            &storage.budgets.get_all()?,
            &storage.limits.get_all()?,
            &storage.transactions.get_all()?,
            &settings.thresholds,
        ))
    }

    /// Number of ceilings already exceeded
    pub fn exceeded_count(&self) -> usize {
        self.budgets
            .iter()
            .chain(self.limits.iter())
            .filter(|s| s.state == CeilingState::Exceeded)
            .count()
    }
}

fn status_icon(state: CeilingState) -> &'static str {
    match state {
        CeilingState::Ok => "✓",
        CeilingState::Approaching => "!",
        CeilingState::Exceeded => "✗",
    }
}

fn status_lines(output: &mut String, statuses: &[CeilingStatus], symbol: &str) {
    output.push_str(&format!(
        "  {:<20} {:>12} {:>12} {:>12} {:>6}\n",
        "Category", "Limit", "Spent", "Remaining", "Used"
    ));
    for status in statuses {
        output.push_str(&format!(
            "{} {:<20} {:>12} {:>12} {:>12} {:>6}  {}\n",
            status_icon(status.state),
            truncate(&status.category, 20),
            money(status.limit, symbol),
            money(status.spent, symbol),
            money(status.remaining, symbol),
            format_percentage(status.percentage),
            format_bar(status.percentage.min(100.0), 100.0, 10)
        ));
    }
}

impl Report for BudgetStatusReport {
    fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str(&section(&format!("Budget Status: {}", self.month)));

        if self.budgets.is_empty() && self.limits.is_empty() {
            output.push_str("No budgets or category limits apply to this month.\n");
        }

        if !self.budgets.is_empty() {
            output.push_str("\nMonthly budgets\n");
            status_lines(&mut output, &self.budgets, symbol);
        }

        if !self.limits.is_empty() {
            output.push_str("\nCategory limits\n");
            status_lines(&mut output, &self.limits, symbol);
        }

        output.push('\n');
        if self.alerts.is_empty() {
            output.push_str("No alerts. Spending is within limits.\n");
        } else {
            output.push_str(&section("Alerts"));
            for alert in &self.alerts {
                output.push_str(&format!("  • {}\n", alert.describe(symbol)));
            }
        }

        output
    }

    fn export_csv<W: Write>(&self, writer: W) -> PocketResult<()> {
        #[derive(Serialize)]
        struct Row<'a> {
            scope: &'static str,
            category: &'a str,
            limit: f64,
            spent: f64,
            remaining: f64,
            percentage: f64,
            state: CeilingState,
        }

        let rows: Vec<Row> = self
            .budgets
            .iter()
            .map(|s| ("budget", s))
            .chain(self.limits.iter().map(|s| ("limit", s)))
            .map(|(scope, s)| Row {
                scope,
                category: &s.category,
                limit: s.limit.as_f64(),
                spent: s.spent.as_f64(),
                remaining: s.remaining.as_f64(),
                percentage: s.percentage,
                state: s.state,
            })
            .collect();
        write_rows(&rows, writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn march() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    fn expense(units: i64, category: &str, m: u32, d: u32) -> Transaction {
        Transaction::expense(
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
        )
    }

    fn report() -> BudgetStatusReport {
        let budgets = vec![
            Budget::new("Food", Money::from_units(100), march()),
            Budget::new("Food", Money::from_units(900), march().prev()),
        ];
        let limits = vec![CategoryLimit::new("Fun", Money::from_units(200))];
        let txns = vec![
            expense(120, "Food", 3, 4),
            expense(50, "Fun", 3, 5),
            expense(80, "Fun", 2, 5),
        ];
        BudgetStatusReport::build(march(), &budgets, &limits, &txns, &Thresholds::default())
    }

    #[test]
    fn test_build() {
        let report = report();
        assert_eq!(report.budgets.len(), 1);
        assert_eq!(report.budgets[0].percentage, 120.0);
        assert_eq!(report.budgets[0].remaining, Money::from_units(-20));
        assert_eq!(report.limits[0].state, CeilingState::Ok);
        assert_eq!(report.exceeded_count(), 1);

        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].category, "Food");
    }

    #[test]
    fn test_terminal_output() {
        let text = report().format_terminal("$");
        assert!(text.contains("Budget Status: 2024-03"));
        assert!(text.contains("Monthly budgets"));
        assert!(text.contains("Category limits"));
        assert!(text.contains("Food: over budget, $120.00 of $100.00 (120%)"));
    }

    #[test]
    fn test_alert_uses_currency_symbol() {
        let text = report().format_terminal("€");
        assert!(text.contains("€120.00 of €100.00"));
    }

    #[test]
    fn test_empty_month() {
        let report = BudgetStatusReport::build(march(), &[], &[], &[], &Thresholds::default());
        let text = report.format_terminal("$");
        assert!(text.contains("No budgets or category limits apply to this month."));
        assert!(text.contains("No alerts."));
    }

    #[test]
    fn test_csv() {
        let mut buffer = Vec::new();
        report().export_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "scope,category,limit,spent,remaining,percentage,state");
        assert_eq!(lines[1], "budget,Food,100.0,120.0,-20.0,120.0,exceeded");
        assert_eq!(lines[2], "limit,Fun,200.0,50.0,150.0,25.0,ok");
    }
}
