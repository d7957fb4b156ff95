//! Outlier detector
//!
//! Flags expenses that sit well above their category's mean, using the
//! population mean and standard deviation of each category's amounts.

use serde::Serialize;

use super::aggregate::sum_by_category;
use crate::models::{Transaction, TransactionType};

/// A flagged transaction plus the statistics that flagged it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlier {
    pub transaction: Transaction,
    pub category_mean: f64,
    pub category_std_dev: f64,
    /// `mean + sigma * std_dev`
    pub threshold: f64,
}

/// Population mean and standard deviation
fn mean_and_std_dev(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Expenses whose amount exceeds `mean + sigma * stddev` of their category
///
/// Largest amounts first, truncated to `limit`. A category with a single
/// transaction never yields an outlier because its amount equals the mean.
pub fn detect_outliers(transactions: &[Transaction], sigma: f64, limit: usize) -> Vec<Outlier> {
    let buckets = sum_by_category(transactions, TransactionType::Expense);

    let mut outliers: Vec<Outlier> = Vec::new();
    for (category, bucket) in &buckets {
        let (mean, std_dev) = mean_and_std_dev(&bucket.values_f64());
        let threshold = mean + sigma * std_dev;

        outliers.extend(
            transactions
                .iter()
                .filter(|t| t.is_expense() && &t.category == category)
                .filter(|t| t.amount.as_f64() > threshold)
                .map(|t| Outlier {
                    transaction: t.clone(),
                    category_mean: mean,
                    category_std_dev: std_dev,
                    threshold,
                }),
        );
    }

    outliers.sort_by(|a, b| b.transaction.amount.cmp(&a.transaction.amount));
    outliers.truncate(limit);
    outliers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn expense(units: i64, category: &str, day: u32) -> Transaction {
        Transaction::expense(
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
    }

    #[test]
    fn test_two_food_transactions_are_not_outliers() {
        let txns = vec![expense(100, "Food", 5), expense(300, "Food", 20)];

        assert!(detect_outliers(&txns, 1.5, 10).is_empty());

        let (mean, std_dev) = mean_and_std_dev(&[100.0, 300.0]);
        assert_eq!(mean, 200.0);
        assert_eq!(std_dev, 100.0);
        assert_eq!(mean + 1.5 * std_dev, 350.0);
    }

    #[test]
    fn test_single_transaction_category_never_flags() {
        let txns = vec![expense(1_000_000, "Car", 3), expense(5, "Food", 4)];
        assert!(detect_outliers(&txns, 1.5, 10).is_empty());
        assert!(detect_outliers(&txns, 0.0, 10).is_empty());
    }

    #[test]
    fn test_flags_spike() {
        let mut txns: Vec<Transaction> = (1..=9).map(|d| expense(20, "Food", d)).collect();
        txns.push(expense(400, "Food", 10));

        let outliers = detect_outliers(&txns, 1.5, 10);
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].transaction.amount, Money::from_units(400));
        assert_eq!(outliers[0].category_mean, 58.0);
        assert_eq!(outliers[0].threshold, 229.0);
    }

    #[test]
    fn test_income_is_ignored() {
        let mut txns: Vec<Transaction> = (1..=9)
            .map(|d| {
                Transaction::income(
                    Money::from_units(10),
                    "Salary",
                    NaiveDate::from_ymd_opt(2024, 1, d).unwrap(),
                )
            })
            .collect();
        txns.push(Transaction::income(
            Money::from_units(10_000),
            "Salary",
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        ));
        assert!(detect_outliers(&txns, 1.5, 10).is_empty());
    }

    #[test]
    fn test_sorted_descending_and_truncated() {
        let mut txns = Vec::new();
        for (i, category) in ["A", "B", "C"].iter().enumerate() {
            for d in 1..=9 {
                txns.push(expense(10, category, d));
            }
            txns.push(expense(100 * (i as i64 + 1), category, 10));
        }

        let outliers = detect_outliers(&txns, 1.5, 2);
        assert_eq!(outliers.len(), 2);
        assert_eq!(outliers[0].transaction.category, "C");
        assert_eq!(outliers[1].transaction.category, "B");
    }
}
