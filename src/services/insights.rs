//! Month-over-month insights
//!
//! A handful of short observations comparing this month's expense with last
//! month's: categories that moved, budgets overrun, total growth and the
//! biggest category.

use std::fmt;

use serde::Serialize;

use super::aggregate::expense_for_month;
use super::trend::growth_percentage;
use crate::config::Thresholds;
use crate::models::{Ceiling, Money, Transaction, YearMonth};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Insight {
    Increased {
        category: String,
        percentage: f64,
    },
    Decreased {
        category: String,
        percentage: f64,
    },
    BudgetOverrun {
        category: String,
        excess: Money,
    },
    TotalIncreased {
        percentage: f64,
    },
    TopCategory {
        category: String,
        amount: Money,
    },
}

impl Insight {
    /// Whether the insight is bad news
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::Increased { .. } | Self::BudgetOverrun { .. } | Self::TotalIncreased { .. }
        )
    }

    /// One-line description with money shown in `symbol`
    pub fn describe(&self, symbol: &str) -> String {
        match self {
            Self::Increased {
                category,
                percentage,
            } => format!(
                "You spent {:.0}% more on {} this month.",
                percentage,
                category.to_lowercase()
            ),
            Self::Decreased {
                category,
                percentage,
            } => format!(
                "You spent {:.0}% less on {} this month.",
                percentage.abs(),
                category.to_lowercase()
            ),
            Self::BudgetOverrun { category, excess } => format!(
                "You went over the {} budget by {}.",
                category,
                excess.format_with_symbol(symbol)
            ),
            Self::TotalIncreased { percentage } => {
                format!("Total spending is up {:.0}% on last month.", percentage)
            }
            Self::TopCategory { category, amount } => format!(
                "Your largest expense is {} ({}). Consider reviewing it.",
                category.to_lowercase(),
                amount.format_with_symbol(symbol)
            ),
        }
    }
}

impl fmt::Display for Insight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe("$"))
    }
}

/// Insights for `month` against the month before it
///
/// At most `thresholds.max_insights` are returned. Category moves and budget
/// overruns come first; the total and top-category remarks are only added
/// while there is room.
pub fn month_over_month<C: Ceiling>(
    transactions: &[Transaction],
    ceilings: &[C],
    month: YearMonth,
    thresholds: &Thresholds,
) -> Vec<Insight> {
    let current = expense_for_month(transactions, month);
    let previous = expense_for_month(transactions, month.prev());
    let cap = thresholds.max_insights;

    let mut insights = Vec::new();

    for (category, spent) in &current {
        let last = previous.get(category).copied().unwrap_or_default();
        if !last.is_positive() {
            continue;
        }
        let change = growth_percentage(spent.as_f64(), last.as_f64());
        if change > thresholds.category_change_percent {
            insights.push(Insight::Increased {
                category: category.clone(),
                percentage: change,
            });
        } else if change < -thresholds.category_change_percent {
            insights.push(Insight::Decreased {
                category: category.clone(),
                percentage: change,
            });
        }
    }

    for ceiling in ceilings.iter().filter(|c| c.applies_to(month)) {
        let spent = current.get(ceiling.category()).copied().unwrap_or_default();
        if spent > ceiling.limit() {
            insights.push(Insight::BudgetOverrun {
                category: ceiling.category().to_string(),
                excess: spent - ceiling.limit(),
            });
        }
    }

    let total_now: Money = current.values().sum();
    let total_before: Money = previous.values().sum();
    if total_before.is_positive() && insights.len() < cap {
        let change = growth_percentage(total_now.as_f64(), total_before.as_f64());
        if change > thresholds.total_change_percent {
            insights.push(Insight::TotalIncreased { percentage: change });
        }
    }

    if insights.len() < cap {
        let top = current
            .iter()
            .fold(None::<(&String, Money)>, |best, (category, amount)| match best {
                Some((_, best_amount)) if best_amount >= *amount => best,
                _ => Some((category, *amount)),
            });
        if let Some((category, amount)) = top {
            insights.push(Insight::TopCategory {
                category: category.clone(),
                amount,
            });
        }
    }

    insights.truncate(cap);
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, CategoryLimit};
    use chrono::NaiveDate;

    fn month(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    fn expense(units: i64, category: &str, m: u32, d: u32) -> Transaction {
        Transaction::expense(
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(2024, m, d).unwrap(),
        )
    }

    const NO_LIMITS: &[CategoryLimit] = &[];

    #[test]
    fn test_no_data() {
        let insights = month_over_month(&[], NO_LIMITS, month(2024, 3), &Thresholds::default());
        assert!(insights.is_empty());
    }

    #[test]
    fn test_only_top_category_without_history() {
        let txns = vec![expense(50, "Food", 3, 1), expense(80, "Rent", 3, 1)];
        let insights = month_over_month(&txns, NO_LIMITS, month(2024, 3), &Thresholds::default());
        assert_eq!(
            insights,
            vec![Insight::TopCategory {
                category: "Rent".into(),
                amount: Money::from_units(80),
            }]
        );
    }

    #[test]
    fn test_category_moves() {
        let txns = vec![
            expense(100, "Food", 2, 10),
            expense(150, "Food", 3, 10),
            expense(100, "Fun", 2, 10),
            expense(50, "Fun", 3, 10),
            expense(100, "Rent", 2, 10),
            expense(110, "Rent", 3, 10),
        ];
        let insights = month_over_month(&txns, NO_LIMITS, month(2024, 3), &Thresholds::default());

        assert_eq!(insights.len(), 3);
        assert_eq!(
            insights[0],
            Insight::Increased {
                category: "Food".into(),
                percentage: 50.0
            }
        );
        assert_eq!(
            insights[1],
            Insight::Decreased {
                category: "Fun".into(),
                percentage: -50.0
            }
        );
        assert!(insights[0].is_warning());
        assert!(!insights[1].is_warning());
        assert_eq!(insights[1].to_string(), "You spent 50% less on fun this month.");
    }

    #[test]
    fn test_budget_overrun_uses_month_scope() {
        let txns = vec![expense(130, "Food", 3, 10)];
        let budgets = vec![
            Budget::new("Food", Money::from_units(100), month(2024, 3)),
            Budget::new("Food", Money::from_units(10), month(2024, 2)),
        ];
        let insights = month_over_month(&txns, &budgets, month(2024, 3), &Thresholds::default());

        assert_eq!(
            insights[0],
            Insight::BudgetOverrun {
                category: "Food".into(),
                excess: Money::from_units(30),
            }
        );
        assert_eq!(insights.len(), 2);
    }

    #[test]
    fn test_capped_at_max_insights() {
        let mut txns = Vec::new();
        for category in ["A", "B", "C", "D"] {
            txns.push(expense(100, category, 2, 1));
            txns.push(expense(200, category, 3, 1));
        }
        let insights = month_over_month(&txns, NO_LIMITS, month(2024, 3), &Thresholds::default());
        assert_eq!(insights.len(), 3);
        assert!(insights
            .iter()
            .all(|i| matches!(i, Insight::Increased { .. })));
    }
}
