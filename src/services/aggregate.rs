//! Aggregator
//!
//! Reduces a transaction list into grouped sums: by type, by category and by
//! month. Every function is a pure function of its input slice. Category
//! maps are `BTreeMap`s so iteration order never depends on input order;
//! only the per-category `values` sequence follows input order, because the
//! trend estimator reads it as a time series.

use std::collections::BTreeMap;

use serde::Serialize;

use super::trend::trend_percentage;
use crate::models::{DateRange, Money, Transaction, TransactionType, YearMonth};

/// Income, expense and their difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TypeTotals {
    pub income: Money,
    pub expense: Money,
    /// `income - expense`
    pub balance: Money,
}

/// Running sums for one category
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryBucket {
    pub total: Money,
    pub count: usize,
    /// Amounts in input order
    pub values: Vec<Money>,
}

impl CategoryBucket {
    fn push(&mut self, amount: Money) {
        self.total += amount;
        self.count += 1;
        self.values.push(amount);
    }

    /// Arithmetic mean of the amounts, 0 for an empty bucket
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total.as_f64() / self.count as f64
        }
    }

    pub fn values_f64(&self) -> Vec<f64> {
        self.values.iter().map(Money::as_f64).collect()
    }
}

/// Income and expense for one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyAggregate {
    pub month: YearMonth,
    pub income: Money,
    pub expense: Money,
    /// `income - expense`
    pub balance: Money,
}

/// Per-category summary shown in the insights report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregate {
    pub category: String,
    pub total: Money,
    pub count: usize,
    /// Mean amount per transaction
    pub average: f64,
    /// Signed percentage; positive means spend is increasing
    pub trend: f64,
}

/// Keep the transactions whose date falls inside the window, oldest first
///
/// Same-day transactions keep their stored order.
pub fn filter_range(transactions: &[Transaction], range: &DateRange) -> Vec<Transaction> {
    let mut in_range: Vec<Transaction> = transactions
        .iter()
        .filter(|t| range.contains(t.date))
        .cloned()
        .collect();
    in_range.sort_by_key(|t| t.date);
    in_range
}

/// Total income, total expense and the balance between them
pub fn sum_by_type(transactions: &[Transaction]) -> TypeTotals {
    let mut totals = TypeTotals::default();
    for txn in transactions {
        match txn.kind {
            TransactionType::Income => totals.income += txn.amount,
            TransactionType::Expense => totals.expense += txn.amount,
        }
    }
    totals.balance = totals.income - totals.expense;
    totals
}

/// Group transactions of one type by category
pub fn sum_by_category(
    transactions: &[Transaction],
    kind: TransactionType,
) -> BTreeMap<String, CategoryBucket> {
    let mut buckets: BTreeMap<String, CategoryBucket> = BTreeMap::new();
    for txn in transactions.iter().filter(|t| t.kind == kind) {
        buckets
            .entry(txn.category.clone())
            .or_default()
            .push(txn.amount);
    }
    buckets
}

/// Monthly income/expense, ascending by month
pub fn sum_by_month(transactions: &[Transaction]) -> Vec<MonthlyAggregate> {
    let mut months: BTreeMap<YearMonth, TypeTotals> = BTreeMap::new();
    for txn in transactions {
        let entry = months.entry(txn.month()).or_default();
        match txn.kind {
            TransactionType::Income => entry.income += txn.amount,
            TransactionType::Expense => entry.expense += txn.amount,
        }
    }

    months
        .into_iter()
        .map(|(month, totals)| MonthlyAggregate {
            month,
            income: totals.income,
            expense: totals.expense,
            balance: totals.income - totals.expense,
        })
        .collect()
}

/// Expense per category for a single calendar month
pub fn expense_for_month(transactions: &[Transaction], month: YearMonth) -> BTreeMap<String, Money> {
    let mut spend: BTreeMap<String, Money> = BTreeMap::new();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && t.month() == month)
    {
        *spend.entry(txn.category.clone()).or_default() += txn.amount;
    }
    spend
}

/// Summaries with trend for every bucket, largest total first
pub fn category_aggregates(buckets: &BTreeMap<String, CategoryBucket>) -> Vec<CategoryAggregate> {
    let mut aggregates: Vec<CategoryAggregate> = buckets
        .iter()
        .map(|(category, bucket)| CategoryAggregate {
            category: category.clone(),
            total: bucket.total,
            count: bucket.count,
            average: bucket.mean(),
            trend: trend_percentage(&bucket.values_f64()),
        })
        .collect();

    aggregates.sort_by(|a, b| b.total.cmp(&a.total));
    aggregates
}
