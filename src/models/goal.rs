//! Financial goal model
//!
//! A savings target (vacation, emergency fund, ...) with the amount saved so
//! far. Progress is updated manually by the user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::GoalId;
use super::money::Money;

/// What a goal is saving for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Vacation,
    EmergencyFund,
    DebtPayoff,
    #[default]
    Investment,
    Purchase,
    Other,
}

impl GoalType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Vacation => "Vacation",
            Self::EmergencyFund => "Emergency fund",
            Self::DebtPayoff => "Debt payoff",
            Self::Investment => "Investment",
            Self::Purchase => "Purchase",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "vacation" => Ok(Self::Vacation),
            "emergency_fund" | "emergency" => Ok(Self::EmergencyFund),
            "debt_payoff" | "debt" => Ok(Self::DebtPayoff),
            "investment" => Ok(Self::Investment),
            "purchase" => Ok(Self::Purchase),
            "other" => Ok(Self::Other),
            other => Err(format!("Unknown goal type: {}", other)),
        }
    }
}

/// A savings target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub id: GoalId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub goal_type: GoalType,
    pub target_amount: Money,
    #[serde(default)]
    pub current_amount: Money,
    pub target_date: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl FinancialGoal {
    /// Create a goal with nothing saved yet
    pub fn new(
        name: impl Into<String>,
        goal_type: GoalType,
        target_amount: Money,
        target_date: NaiveDate,
    ) -> Self {
        Self {
            id: GoalId::new(),
            name: name.into(),
            description: None,
            goal_type,
            target_amount,
            current_amount: Money::zero(),
            target_date,
            is_active: true,
            created_at: Some(Utc::now()),
        }
    }

    /// Percentage of the target saved so far (0 when the target is zero)
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount.is_zero() {
            return 0.0;
        }
        self.current_amount.cents() as f64 * 100.0 / self.target_amount.cents() as f64
    }

    /// Amount still missing, never below zero
    pub fn remaining(&self) -> Money {
        let remaining = self.target_amount - self.current_amount;
        if remaining.is_negative() {
            Money::zero()
        } else {
            remaining
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Record the amount saved so far
    ///
    /// The amount must lie between zero and the target.
    pub fn set_progress(&mut self, amount: Money) -> Result<(), String> {
        if amount.is_negative() || amount > self.target_amount {
            return Err(format!(
                "Saved amount must be between {} and {} (got {})",
                Money::zero(),
                self.target_amount,
                amount
            ));
        }
        self.current_amount = amount;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Goal name is required".into());
        }
        if !self.target_amount.is_positive() {
            return Err(format!(
                "Target amount must be greater than zero (got {})",
                self.target_amount
            ));
        }
        Ok(())
    }
}

impl fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} ({:.0}%)",
            self.name,
            self.current_amount,
            self.target_amount,
            self.progress_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(target: i64) -> FinancialGoal {
        FinancialGoal::new(
            "Trip",
            GoalType::Vacation,
            Money::from_units(target),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        )
    }

    #[test]
    fn test_progress() {
        let mut g = goal(1000);
        assert_eq!(g.progress_percent(), 0.0);

        g.set_progress(Money::from_units(250)).unwrap();
        assert_eq!(g.progress_percent(), 25.0);
        assert_eq!(g.remaining(), Money::from_units(750));
        assert!(!g.is_complete());

        g.set_progress(Money::from_units(1000)).unwrap();
        assert!(g.is_complete());
        assert_eq!(g.remaining(), Money::zero());
    }

    #[test]
    fn test_set_progress_bounds() {
        let mut g = goal(100);
        assert!(g.set_progress(Money::from_units(101)).is_err());
        assert!(g.set_progress(Money::from_cents(-1)).is_err());
        assert_eq!(g.current_amount, Money::zero());
    }

    #[test]
    fn test_zero_target_progress_is_zero() {
        let g = goal(0);
        assert_eq!(g.progress_percent(), 0.0);
        assert!(g.validate().is_err());
    }

    #[test]
    fn test_goal_type_parse() {
        assert_eq!("emergency-fund".parse::<GoalType>(), Ok(GoalType::EmergencyFund));
        assert_eq!("Debt Payoff".parse::<GoalType>(), Ok(GoalType::DebtPayoff));
        assert!("yacht".parse::<GoalType>().is_err());
    }
}
