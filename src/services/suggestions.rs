//! Spending tips
//!
//! Rule-based suggestions ranked by priority: trim food, leisure or
//! transport when they run high, and two standing tips (an emergency fund
//! and per-category budgets) whenever there is any spending at all.

use std::fmt;

use serde::Serialize;

use super::aggregate::sum_by_category;
use super::budget::percent_of;
use super::patterns::Severity;
use crate::config::Thresholds;
use crate::models::{Money, Transaction, TransactionType};

const FOOD: &str = "Food";
const LEISURE: &str = "Leisure";
const TRANSPORT: &str = "Transport";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TipKind {
    FoodReduction,
    LeisureReduction,
    TransportOptimization,
    EmergencyFund,
    CategoryBudgets,
}

impl TipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodReduction => "food_reduction",
            Self::LeisureReduction => "leisure_reduction",
            Self::TransportOptimization => "transport_optimization",
            Self::EmergencyFund => "emergency_fund",
            Self::CategoryBudgets => "category_budgets",
        }
    }
}

impl fmt::Display for TipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One suggestion with the saving it could bring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingTip {
    pub kind: TipKind,
    pub priority: Severity,
    /// Spend the tip is based on: the category total, or all expenses
    pub spent: Money,
    /// `spent` as a percentage of all expenses
    pub share: f64,
    pub potential_savings: Money,
}

impl SpendingTip {
    fn new(kind: TipKind, priority: Severity, spent: Money, total: Money, rate: f64) -> Self {
        Self {
            kind,
            priority,
            spent,
            share: percent_of(spent, total),
            potential_savings: Money::from_decimal(spent.as_f64() * rate),
        }
    }

    pub fn describe(&self, symbol: &str) -> String {
        let spent = self.spent.format_with_symbol(symbol);
        let savings = self.potential_savings.format_with_symbol(symbol);
        match self.kind {
            TipKind::FoodReduction => format!(
                "Food is {:.0}% of your spending. Cooking at home a few times a week could save about {}.",
                self.share, savings
            ),
            TipKind::LeisureReduction => format!(
                "You spent {} on leisure. Shared subscriptions and free activities could save about {}.",
                spent, savings
            ),
            TipKind::TransportOptimization => format!(
                "You spent {} on transport. Car-sharing, cycling or public transport could save about {}.",
                spent, savings
            ),
            TipKind::EmergencyFund => format!(
                "Set aside about {} in a separate account for emergencies.",
                savings
            ),
            TipKind::CategoryBudgets => format!(
                "Setting a budget for each category could save about {}.",
                savings
            ),
        }
    }
}

impl fmt::Display for SpendingTip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe("$"))
    }
}

/// Tips for the expenses in `transactions`, highest priority first
///
/// Category rules match the category label case-insensitively. No expense
/// means no tips.
pub fn spending_tips(transactions: &[Transaction], thresholds: &Thresholds) -> Vec<SpendingTip> {
    let buckets = sum_by_category(transactions, TransactionType::Expense);
    let total: Money = buckets.values().map(|b| b.total).sum();
    if !total.is_positive() {
        return Vec::new();
    }

    let spent_on = |label: &str| -> Money {
        buckets
            .iter()
            .filter(|(category, _)| category.trim().eq_ignore_ascii_case(label))
            .map(|(_, bucket)| bucket.total)
            .sum()
    };

    let mut tips = Vec::new();

    let food = spent_on(FOOD);
    if percent_of(food, total) > thresholds.food_share_percent {
        tips.push(SpendingTip::new(
            TipKind::FoodReduction,
            Severity::High,
            food,
            total,
            thresholds.food_reduction,
        ));
    }

    let leisure = spent_on(LEISURE);
    if percent_of(leisure, total) > thresholds.leisure_share_percent {
        tips.push(SpendingTip::new(
            TipKind::LeisureReduction,
            Severity::Medium,
            leisure,
            total,
            thresholds.leisure_reduction,
        ));
    }

    let transport = spent_on(TRANSPORT);
    if transport.as_f64() > thresholds.transport_min_total {
        tips.push(SpendingTip::new(
            TipKind::TransportOptimization,
            Severity::Medium,
            transport,
            total,
            thresholds.transport_reduction,
        ));
    }

    tips.push(SpendingTip::new(
        TipKind::EmergencyFund,
        Severity::High,
        total,
        total,
        thresholds.emergency_fund_rate,
    ));
    tips.push(SpendingTip::new(
        TipKind::CategoryBudgets,
        Severity::High,
        total,
        total,
        thresholds.category_budget_rate,
    ));

    // Stable, so rule order holds within a priority
    tips.sort_by_key(|t| t.priority);
    tips
}
