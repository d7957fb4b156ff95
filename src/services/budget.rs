//! Budget/limit tracker
//!
//! Compares current-month expense per category against budgets and standing
//! category limits, and flags categories whose spend jumped against the
//! previous month regardless of any configured ceiling.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::aggregate::expense_for_month;
use crate::config::Thresholds;
use crate::models::{Ceiling, Money, Transaction, YearMonth};

/// Where a category stands against its ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CeilingState {
    Ok,
    Approaching,
    Exceeded,
}

impl CeilingState {
    /// `exceeded` at 100% or more, `approaching` from `approaching_percent`
    pub fn classify(percentage: f64, approaching_percent: f64) -> Self {
        if percentage >= 100.0 {
            Self::Exceeded
        } else if percentage >= approaching_percent {
            Self::Approaching
        } else {
            Self::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Approaching => "approaching",
            Self::Exceeded => "exceeded",
        }
    }
}

impl fmt::Display for CeilingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Spend against one ceiling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CeilingStatus {
    pub category: String,
    pub limit: Money,
    pub spent: Money,
    /// `spent / limit * 100`
    pub percentage: f64,
    /// `limit - spent`, negative once exceeded
    pub remaining: Money,
    pub state: CeilingState,
}

/// Kind of budget alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Exceeded,
    Approaching,
    OverspendVsLastMonth,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exceeded => "exceeded",
            Self::Approaching => "approaching",
            Self::OverspendVsLastMonth => "overspend_vs_last_month",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A category that needs attention this month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub category: String,
    pub kind: AlertKind,
    /// Share of the ceiling used, or growth over last month for
    /// [`AlertKind::OverspendVsLastMonth`]
    pub percentage: f64,
    /// Spend this month
    pub current: Money,
    /// The ceiling, or last month's spend
    pub reference: Money,
}

impl Alert {
    /// One-line description with money shown in `symbol`
    pub fn describe(&self, symbol: &str) -> String {
        let current = self.current.format_with_symbol(symbol);
        let reference = self.reference.format_with_symbol(symbol);
        match self.kind {
            AlertKind::Exceeded => format!(
                "{}: over budget, {} of {} ({:.0}%)",
                self.category, current, reference, self.percentage
            ),
            AlertKind::Approaching => format!(
                "{}: {:.0}% of budget used ({} of {})",
                self.category, self.percentage, current, reference
            ),
            AlertKind::OverspendVsLastMonth => format!(
                "{}: spending up {:.0}% on last month ({} vs {})",
                self.category, self.percentage, current, reference
            ),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe("$"))
    }
}

/// Percentage of `part` in `whole`, 0 when `whole` is not positive
pub fn percent_of(part: Money, whole: Money) -> f64 {
    if whole.cents() <= 0 {
        return 0.0;
    }
    part.cents() as f64 * 100.0 / whole.cents() as f64
}

/// Budget tracking for one month
#[derive(Debug, Clone, Copy)]
pub struct BudgetTracker {
    month: YearMonth,
    approaching_percent: f64,
    overspend_ratio: f64,
}

impl BudgetTracker {
    /// Tracker with the stock thresholds (80% approaching, 1.2x overspend)
    pub fn new(month: YearMonth) -> Self {
        Self::with_thresholds(month, &Thresholds::default())
    }

    pub fn with_thresholds(month: YearMonth, thresholds: &Thresholds) -> Self {
        Self {
            month,
            approaching_percent: thresholds.approaching_percent,
            overspend_ratio: thresholds.overspend_ratio,
        }
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    /// Status of every ceiling in force this month, ordered by category
    ///
    /// When several ceilings target the same category the last one in the
    /// slice wins.
    pub fn status<C: Ceiling>(&self, ceilings: &[C], transactions: &[Transaction]) -> Vec<CeilingStatus> {
        let spend = expense_for_month(transactions, self.month);

        let mut latest: BTreeMap<&str, &C> = BTreeMap::new();
        for ceiling in ceilings.iter().filter(|c| c.applies_to(self.month)) {
            latest.insert(ceiling.category(), ceiling);
        }

        latest
            .into_iter()
            .map(|(category, ceiling)| {
                let limit = ceiling.limit();
                let spent = spend.get(category).copied().unwrap_or_default();
                let percentage = percent_of(spent, limit);
                CeilingStatus {
                    category: category.to_string(),
                    limit,
                    spent,
                    percentage,
                    remaining: limit - spent,
                    state: CeilingState::classify(percentage, self.approaching_percent),
                }
            })
            .collect()
    }

    /// Categories whose spend grew past the overspend ratio since last month
    ///
    /// A category with no spend last month is never flagged.
    pub fn overspend_vs_last_month(&self, transactions: &[Transaction]) -> Vec<Alert> {
        let current = expense_for_month(transactions, self.month);
        let previous = expense_for_month(transactions, self.month.prev());

        current
            .into_iter()
            .filter_map(|(category, spent)| {
                let last = previous.get(&category).copied().unwrap_or_default();
                if !last.is_positive() || spent.as_f64() <= last.as_f64() * self.overspend_ratio {
                    return None;
                }
                Some(Alert {
                    percentage: percent_of(spent - last, last),
                    category,
                    kind: AlertKind::OverspendVsLastMonth,
                    current: spent,
                    reference: last,
                })
            })
            .collect()
    }

    /// Alerts for the given statuses plus month-over-month overspend,
    /// highest percentage first
    pub fn alerts(&self, statuses: &[CeilingStatus], transactions: &[Transaction]) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = statuses
            .iter()
            .filter_map(|status| {
                let kind = match status.state {
                    CeilingState::Exceeded => AlertKind::Exceeded,
                    CeilingState::Approaching => AlertKind::Approaching,
                    CeilingState::Ok => return None,
                };
                Some(Alert {
                    category: status.category.clone(),
                    kind,
                    percentage: status.percentage,
                    current: status.spent,
                    reference: status.limit,
                })
            })
            .collect();

        alerts.extend(self.overspend_vs_last_month(transactions));
        alerts.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        alerts
    }
}
