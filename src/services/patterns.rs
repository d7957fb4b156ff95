//! Spending pattern alerts
//!
//! Heuristics over the expenses of a period: likely duplicate charges,
//! unusually large single expenses and categories that dominate spending.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::aggregate::{sum_by_category, sum_by_type};
use super::budget::percent_of;
use crate::config::Thresholds;
use crate::models::{Money, Transaction, TransactionId, TransactionType};

/// How urgently a pattern should be looked at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Same amount charged in the same category a few days apart
    Duplicate,
    /// One expense far above the category's mean
    HighSpend,
    /// Category takes an outsized share of total expense
    CategoryShare,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::HighSpend => "high_spend",
            Self::CategoryShare => "category_share",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternAlert {
    pub kind: PatternKind,
    pub severity: Severity,
    pub category: String,
    /// Duplicate: amount times occurrences. High spend: the largest
    /// expense. Category share: the category total.
    pub amount: Money,
    /// Duplicate: 0. High spend: how far the max sits above the mean.
    /// Category share: share of total expense.
    pub percentage: f64,
    /// Transactions behind a duplicate alert
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<TransactionId>,
}

impl PatternAlert {
    /// One-line description with money shown in `symbol`
    pub fn describe(&self, symbol: &str) -> String {
        let amount = self.amount.format_with_symbol(symbol);
        match self.kind {
            PatternKind::Duplicate => format!(
                "Possible duplicate: {} charges in {} totalling {}",
                self.transactions.len(),
                self.category,
                amount
            ),
            PatternKind::HighSpend => format!(
                "High spend in {}: {} is {:.0}% above the average",
                self.category, amount, self.percentage
            ),
            PatternKind::CategoryShare => format!(
                "{} is {:.0}% of all spending ({})",
                self.category, self.percentage, amount
            ),
        }
    }
}

impl fmt::Display for PatternAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe("$"))
    }
}

fn duplicate_alerts(expenses: &[&Transaction], window_days: i64) -> Vec<PatternAlert> {
    let mut groups: BTreeMap<(&str, Money), Vec<&Transaction>> = BTreeMap::new();
    for txn in expenses {
        groups
            .entry((txn.category.as_str(), txn.amount))
            .or_default()
            .push(txn);
    }

    groups
        .into_iter()
        .filter(|(_, txns)| txns.len() > 1)
        .filter_map(|((category, amount), mut txns)| {
            txns.sort_by_key(|t| t.date);
            let close = txns.windows(2).any(|pair| {
                let gap = (pair[1].date - pair[0].date).num_days();
                gap > 0 && gap <= window_days
            });
            if !close {
                return None;
            }
            Some(PatternAlert {
                kind: PatternKind::Duplicate,
                severity: Severity::High,
                category: category.to_string(),
                amount: Money::from_cents(amount.cents().saturating_mul(txns.len() as i64)),
                percentage: 0.0,
                transactions: txns.iter().map(|t| t.id).collect(),
            })
        })
        .collect()
}

/// Pattern alerts for the expenses in `transactions`, most severe first
pub fn detect_patterns(transactions: &[Transaction], thresholds: &Thresholds) -> Vec<PatternAlert> {
    let expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();
    if expenses.is_empty() {
        return Vec::new();
    }

    let mut alerts = duplicate_alerts(&expenses, thresholds.duplicate_window_days);

    let buckets = sum_by_category(transactions, TransactionType::Expense);
    for (category, bucket) in &buckets {
        if bucket.count < 2 {
            continue;
        }
        let mean = bucket.mean();
        let Some(max) = bucket.values.iter().max().copied() else {
            continue;
        };
        if max.as_f64() > mean * thresholds.high_spend_multiplier {
            alerts.push(PatternAlert {
                kind: PatternKind::HighSpend,
                severity: Severity::Medium,
                category: category.clone(),
                amount: max,
                percentage: (max.as_f64() / mean - 1.0) * 100.0,
                transactions: Vec::new(),
            });
        }
    }

    let total = sum_by_type(transactions).expense;
    for (category, bucket) in &buckets {
        let share = percent_of(bucket.total, total);
        if share > thresholds.category_share_percent {
            alerts.push(PatternAlert {
                kind: PatternKind::CategoryShare,
                severity: Severity::Low,
                category: category.clone(),
                amount: bucket.total,
                percentage: share,
                transactions: Vec::new(),
            });
        }
    }

    // Stable, so generation order holds within a severity
    alerts.sort_by_key(|a| a.severity);
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn expense(units: i64, category: &str, day: u32) -> Transaction {
        Transaction::expense(
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        )
    }

    fn kinds(alerts: &[PatternAlert]) -> Vec<(PatternKind, &str)> {
        alerts.iter().map(|a| (a.kind, a.category.as_str())).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(detect_patterns(&[], &Thresholds::default()).is_empty());
    }

    #[test]
    fn test_duplicate_total_saturates() {
        let huge = Money::from_cents(i64::MAX / 2 + 1);
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let txns = vec![
            Transaction::expense(huge, "Gadgets", day(10)),
            Transaction::expense(huge, "Gadgets", day(11)),
        ];
        let alerts = detect_patterns(&txns, &Thresholds::default());

        let duplicate = alerts
            .iter()
            .find(|a| a.kind == PatternKind::Duplicate)
            .unwrap();
        assert_eq!(duplicate.amount, Money::from_cents(i64::MAX));
    }

    #[test]
    fn test_duplicate_within_window() {
        let txns = vec![
            expense(15, "Streaming", 10),
            expense(15, "Streaming", 12),
            expense(500, "Rent", 1),
            expense(500, "Rent", 1),
        ];
        let alerts = detect_patterns(&txns, &Thresholds::default());

        let duplicates: Vec<&PatternAlert> = alerts
            .iter()
            .filter(|a| a.kind == PatternKind::Duplicate)
            .collect();
        // Same-day repeats have a zero gap and are not flagged
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].category, "Streaming");
        assert_eq!(duplicates[0].amount, Money::from_units(30));
        assert_eq!(duplicates[0].transactions.len(), 2);
        assert_eq!(alerts[0].severity, Severity::High);
    }

    #[test]
    fn test_duplicate_outside_window() {
        let txns = vec![expense(15, "Streaming", 1), expense(15, "Streaming", 5)];
        let alerts = detect_patterns(&txns, &Thresholds::default());
        assert!(alerts.iter().all(|a| a.kind != PatternKind::Duplicate));
    }

    #[test]
    fn test_high_spend() {
        let txns = vec![
            expense(10, "Food", 1),
            expense(10, "Food", 8),
            expense(10, "Food", 15),
            expense(90, "Food", 22),
        ];
        let alerts = detect_patterns(&txns, &Thresholds::default());
        let high: Vec<&PatternAlert> = alerts
            .iter()
            .filter(|a| a.kind == PatternKind::HighSpend)
            .collect();

        assert_eq!(high.len(), 1);
        assert_eq!(high[0].amount, Money::from_units(90));
        // mean 30, max 90
        assert_eq!(high[0].percentage, 200.0);
    }

    #[test]
    fn test_category_share_and_ordering() {
        let txns = vec![
            expense(700, "Rent", 1),
            expense(100, "Food", 3),
            expense(100, "Food", 9),
            expense(60, "Fun", 2),
            expense(40, "Fun", 20),
        ];
        let alerts = detect_patterns(&txns, &Thresholds::default());

        assert_eq!(kinds(&alerts), vec![(PatternKind::CategoryShare, "Rent")]);
        assert_eq!(alerts[0].percentage, 70.0);
        assert_eq!(alerts[0].severity, Severity::Low);
    }

    #[test]
    fn test_sorted_by_severity() {
        let txns = vec![
            expense(20, "Taxi", 2),
            expense(20, "Taxi", 3),
            expense(5, "Food", 1),
            expense(5, "Food", 10),
            expense(5, "Food", 20),
            expense(60, "Food", 28),
        ];
        let alerts = detect_patterns(&txns, &Thresholds::default());
        let severities: Vec<Severity> = alerts.iter().map(|a| a.severity).collect();

        let mut sorted = severities.clone();
        sorted.sort();
        assert_eq!(severities, sorted);
        assert_eq!(alerts[0].kind, PatternKind::Duplicate);
    }
}
