//! Savings suggestion heuristic
//!
//! Fixed-formula "you could save X" tips: any category whose average expense
//! is above a threshold is assumed to be cut by a flat share, and the period
//! total is annualised by a flat multiplier. The multiplier is applied
//! whatever the period length; a six-month window therefore projects six
//! times what a one-month window would.

use std::collections::BTreeMap;

use serde::Serialize;

use super::aggregate::CategoryBucket;
use crate::config::Thresholds;
use crate::models::Money;

/// One savings tip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsSuggestion {
    pub category: String,
    /// Category total for the analysed period
    pub total: Money,
    /// Mean amount per transaction
    pub average: f64,
    /// Projected yearly saving, rounded to whole currency units
    pub projected_savings: Money,
}

/// Savings tips for the given expense buckets, largest projection first
pub fn suggest_savings(
    buckets: &BTreeMap<String, CategoryBucket>,
    thresholds: &Thresholds,
) -> Vec<SavingsSuggestion> {
    let mut suggestions: Vec<SavingsSuggestion> = buckets
        .iter()
        .filter(|(_, bucket)| bucket.mean() > thresholds.savings_min_average)
        .map(|(category, bucket)| {
            let projected = bucket.total.as_f64()
                * thresholds.savings_reduction
                * thresholds.savings_annualization;
            SavingsSuggestion {
                category: category.clone(),
                total: bucket.total,
                average: bucket.mean(),
                projected_savings: Money::from_units(projected.round() as i64),
            }
        })
        .collect();

    suggestions.sort_by(|a, b| b.projected_savings.cmp(&a.projected_savings));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Transaction, TransactionType};
    use crate::services::aggregate::sum_by_category;
    use chrono::NaiveDate;

    fn expense(amount: Money, category: &str, day: u32) -> Transaction {
        Transaction::expense(amount, category, NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
    }

    #[test]
    fn test_low_average_never_suggested() {
        // Large total, small average
        let txns: Vec<Transaction> = (1..=28)
            .map(|d| expense(Money::from_units(100), "Coffee", d))
            .collect();
        let buckets = sum_by_category(&txns, TransactionType::Expense);

        assert!(suggest_savings(&buckets, &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_projection_and_order() {
        let txns = vec![
            expense(Money::from_units(1200), "Rent", 1),
            expense(Money::from_cents(15050), "Dining", 2),
            expense(Money::from_cents(10001), "Gym", 3),
        ];
        let buckets = sum_by_category(&txns, TransactionType::Expense);

        let suggestions = suggest_savings(&buckets, &Thresholds::default());
        let categories: Vec<&str> = suggestions.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(categories, vec!["Rent", "Dining", "Gym"]);

        // 1200 * 0.2 * 12
        assert_eq!(suggestions[0].projected_savings, Money::from_units(2880));
        // 150.50 * 0.2 * 12 = 361.2
        assert_eq!(suggestions[1].projected_savings, Money::from_units(361));
    }

    #[test]
    fn test_custom_thresholds() {
        let txns = vec![expense(Money::from_units(50), "Books", 1)];
        let buckets = sum_by_category(&txns, TransactionType::Expense);

        let thresholds = Thresholds {
            savings_min_average: 10.0,
            savings_reduction: 0.5,
            savings_annualization: 1.0,
            ..Thresholds::default()
        };
        let suggestions = suggest_savings(&buckets, &thresholds);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].projected_savings, Money::from_units(25));
    }
}
