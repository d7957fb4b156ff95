//! Spending plan
//!
//! Splits the period's income by the recommended share per category and
//! compares each slice with what was actually spent.

use serde::Serialize;

use super::aggregate::{sum_by_category, sum_by_type};
use super::budget::{percent_of, CeilingState};
use crate::config::{PlanShare, Thresholds};
use crate::models::{Money, Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRow {
    pub category: String,
    /// Fraction of income recommended for the category
    pub share: f64,
    pub recommended: Money,
    pub spent: Money,
    /// `recommended - spent`, negative when over plan
    pub difference: Money,
    /// Share of the recommendation already spent
    pub used_percent: f64,
    pub state: CeilingState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingPlan {
    pub income: Money,
    pub expense: Money,
    pub rows: Vec<PlanRow>,
}

impl SpendingPlan {
    /// Categories spending more than recommended
    pub fn over_plan(&self) -> impl Iterator<Item = &PlanRow> {
        self.rows.iter().filter(|r| r.difference.is_negative())
    }
}

/// Build the plan for the given transactions
///
/// Categories with nothing recommended and nothing spent are left out.
pub fn build_plan(transactions: &[Transaction], shares: &[PlanShare], thresholds: &Thresholds) -> SpendingPlan {
    let totals = sum_by_type(transactions);
    let buckets = sum_by_category(transactions, TransactionType::Expense);

    let rows = shares
        .iter()
        .filter_map(|plan| {
            let recommended = Money::from_decimal(totals.income.as_f64() * plan.share);
            let spent = buckets
                .get(&plan.category)
                .map(|b| b.total)
                .unwrap_or_default();
            if recommended.is_zero() && spent.is_zero() {
                return None;
            }
            let used_percent = percent_of(spent, recommended);
            let state = if recommended.is_zero() {
                CeilingState::Exceeded
            } else {
                CeilingState::classify(used_percent, thresholds.approaching_percent)
            };
            Some(PlanRow {
                category: plan.category.clone(),
                share: plan.share,
                recommended,
                spent,
                difference: recommended - spent,
                used_percent,
                state,
            })
        })
        .collect();

    SpendingPlan {
        income: totals.income,
        expense: totals.expense,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use chrono::NaiveDate;

    fn on(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_plan_against_income() {
        let settings = Settings::default();
        let txns = vec![
            Transaction::income(Money::from_units(4000), "Salary", on(1)),
            Transaction::expense(Money::from_units(1100), "Food", on(3)),
            Transaction::expense(Money::from_units(300), "Transport", on(4)),
        ];

        let plan = build_plan(&txns, &settings.plan, &settings.thresholds);
        assert_eq!(plan.income, Money::from_units(4000));
        assert_eq!(plan.expense, Money::from_units(1400));
        assert_eq!(plan.rows.len(), settings.plan.len());

        let food = &plan.rows[0];
        assert_eq!(food.recommended, Money::from_units(1000));
        assert_eq!(food.difference, Money::from_units(-100));
        assert_eq!(food.state, CeilingState::Exceeded);

        let transport = &plan.rows[1];
        assert_eq!(transport.recommended, Money::from_units(600));
        assert_eq!(transport.used_percent, 50.0);
        assert_eq!(transport.state, CeilingState::Ok);

        let over: Vec<&str> = plan.over_plan().map(|r| r.category.as_str()).collect();
        assert_eq!(over, vec!["Food"]);
    }

    #[test]
    fn test_no_income_keeps_only_spent_rows() {
        let settings = Settings::default();
        let txns = vec![Transaction::expense(Money::from_units(20), "Leisure", on(2))];

        let plan = build_plan(&txns, &settings.plan, &settings.thresholds);
        assert_eq!(plan.rows.len(), 1);
        assert_eq!(plan.rows[0].category, "Leisure");
        assert_eq!(plan.rows[0].used_percent, 0.0);
        assert_eq!(plan.rows[0].state, CeilingState::Exceeded);
    }
}
