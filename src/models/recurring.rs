//! Recurring expense model
//!
//! Subscriptions and other repeating charges. Each one is normalised to a
//! monthly equivalent so the total monthly commitment can be shown.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::RecurringExpenseId;
use super::money::Money;

/// How often a recurring expense is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    /// Factor that converts one charge into a monthly equivalent
    pub fn monthly_multiplier(&self) -> f64 {
        match self {
            Self::Daily => 30.0,
            Self::Weekly => 4.33,
            Self::Monthly => 1.0,
            Self::Quarterly => 0.25,
            Self::Yearly => 1.0 / 12.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

/// A repeating charge such as a subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: RecurringExpenseId,
    pub description: String,
    pub amount: Money,
    pub category: String,
    #[serde(default)]
    pub frequency: Frequency,
    pub next_charge_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl RecurringExpense {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        frequency: Frequency,
        next_charge_date: NaiveDate,
    ) -> Self {
        Self {
            id: RecurringExpenseId::new(),
            description: description.into(),
            amount,
            category: category.into(),
            frequency,
            next_charge_date,
            notes: None,
            is_active: true,
            created_at: Some(Utc::now()),
        }
    }

    /// What this charge costs per month
    pub fn monthly_equivalent(&self) -> Money {
        Money::from_decimal(self.amount.as_f64() * self.frequency.monthly_multiplier())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.description.trim().is_empty() {
            return Err("Description is required".into());
        }
        if self.category.trim().is_empty() {
            return Err("Category is required".into());
        }
        if !self.amount.is_positive() {
            return Err(format!("Amount must be greater than zero (got {})", self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for RecurringExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}, next {})",
            self.description, self.amount, self.frequency, self.next_charge_date
        )
    }
}
