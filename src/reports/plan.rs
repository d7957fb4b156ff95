//! Planning Report
//!
//! Recommended income split against actual spend for the period, together
//! with spending tips, recurring commitments and progress on savings goals.

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::config::Settings;
use crate::display::report::{format_bar, format_percentage, money, section, truncate};
use crate::error::PocketResult;
use crate::export::{write_rows, Report};
use crate::models::{DateRange, FinancialGoal, PeriodToken, RecurringExpense, Transaction};
use crate::services::recurring::RecurringSummary;
use crate::services::{
    build_plan, filter_range, spending_tips, CeilingState, GoalSummary, PeriodResolver,
    SpendingPlan, SpendingTip,
};
use crate::storage::Storage;

/// Days ahead the report looks for upcoming recurring charges
pub const UPCOMING_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub period: PeriodToken,
    pub range: DateRange,
    pub plan: SpendingPlan,
    pub tips: Vec<SpendingTip>,
    pub recurring: RecurringSummary,
    pub goals: GoalSummary,
}

impl PlanReport {
    /// `today` anchors the upcoming-charges window
    pub fn build(
        transactions: &[Transaction],
        recurring: &[RecurringExpense],
        goals: &[FinancialGoal],
        period: PeriodToken,
        range: DateRange,
        today: NaiveDate,
        settings: &Settings,
    ) -> Self {
        let in_range = filter_range(transactions, &range);
        Self {
            period,
            range,
            plan: build_plan(&in_range, &settings.plan, &settings.thresholds),
            tips: spending_tips(&in_range, &settings.thresholds),
            recurring: RecurringSummary::from_expenses(recurring, today, UPCOMING_DAYS),
            goals: GoalSummary::from_goals(goals),
        }
    }

    pub fn generate(
        storage: &Storage,
        resolver: &PeriodResolver,
        period: PeriodToken,
        settings: &Settings,
    ) -> PocketResult<Self> {
        let range = resolver.resolve(period);
        info!(period = %period, %range, "generating plan report");
        Ok(Self::build(
            &storage.transactions.get_all()?,
            &storage.recurring.get_all()?,
            &storage.goals.get_all()?,
            period,
            range,
            resolver.today(),
            settings,
        ))
    }
}

impl Report for PlanReport {
    fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&section(&format!(
            "Spending Plan: {} ({})",
            self.period, self.range
        )));
        output.push_str(&format!("Income:   {:>14}\n", money(self.plan.income, symbol)));
        output.push_str(&format!("Expenses: {:>14}\n\n", money(self.plan.expense, symbol)));

        if self.plan.rows.is_empty() {
            output.push_str("No income or planned spending in this period.\n");
        } else {
            output.push_str(&format!(
                "{:<14} {:>6} {:>12} {:>12} {:>12}\n",
                "Category", "Share", "Planned", "Spent", "Left"
            ));
            for row in &self.plan.rows {
                output.push_str(&format!(
                    "{:<14} {:>6} {:>12} {:>12} {:>12}  {}\n",
                    truncate(&row.category, 14),
                    format_percentage(row.share * 100.0),
                    money(row.recommended, symbol),
                    money(row.spent, symbol),
                    money(row.difference, symbol),
                    row.state
                ));
            }
        }

        if !self.tips.is_empty() {
            output.push('\n');
            output.push_str(&section("Suggestions"));
            for tip in &self.tips {
                output.push_str(&format!("[{:<6}] {}\n", tip.priority, tip.describe(symbol)));
            }
        }

        output.push('\n');
        output.push_str(&section("Recurring Expenses"));
        output.push_str(&format!(
            "{} active, {} per month\n",
            self.recurring.active,
            money(self.recurring.monthly_total, symbol)
        ));
        for expense in &self.recurring.upcoming {
            output.push_str(&format!(
                "  due {}  {:<24} {:>12}\n",
                expense.next_charge_date,
                truncate(&expense.description, 24),
                money(expense.amount, symbol)
            ));
        }

        output.push('\n');
        output.push_str(&section("Goals"));
        if self.goals.active == 0 {
            output.push_str("No active goals.\n");
        } else {
            output.push_str(&format!(
                "{} active, {} completed\n{} of {} saved  {} {}\n",
                self.goals.active,
                self.goals.completed,
                money(self.goals.total_saved, symbol),
                money(self.goals.total_target, symbol),
                format_bar(self.goals.overall_progress, 100.0, 20),
                format_percentage(self.goals.overall_progress)
            ));
        }

        output
    }

    fn export_csv<W: Write>(&self, writer: W) -> PocketResult<()> {
        #[derive(Serialize)]
        struct Row<'a> {
            category: &'a str,
            share: f64,
            recommended: f64,
            spent: f64,
            difference: f64,
            state: CeilingState,
        }

        let rows: Vec<Row> = self
            .plan
            .rows
            .iter()
            .map(|r| Row {
                category: &r.category,
                share: r.share,
                recommended: r.recommended.as_f64(),
                spent: r.spent.as_f64(),
                difference: r.difference.as_f64(),
                state: r.state,
            })
            .collect();
        write_rows(&rows, writer)
    }
}
