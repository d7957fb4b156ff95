//! Spending ceilings: month-scoped budgets and standing category limits
//!
//! The source system keeps these as two tables. They stay two types here,
//! and the tracker consumes either through the [`Ceiling`] trait.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryLimitId};
use super::money::Money;
use super::month::YearMonth;

/// Anything that caps monthly spend in a category
pub trait Ceiling {
    /// Category label the ceiling applies to
    fn category(&self) -> &str;

    /// Monthly spending ceiling
    fn limit(&self) -> Money;

    /// Whether the ceiling is in force for the given month
    fn applies_to(&self, month: YearMonth) -> bool;
}

/// A spending plan for one category in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,

    pub category: String,

    /// Spending ceiling for the month
    pub limit: Money,

    /// Month the budget is planned for
    pub month: YearMonth,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Budget {
    pub fn new(category: impl Into<String>, limit: Money, month: YearMonth) -> Self {
        Self {
            id: BudgetId::new(),
            category: category.into(),
            limit,
            month,
            created_at: Some(Utc::now()),
        }
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), CeilingValidationError> {
        validate_ceiling(&self.category, self.limit)
    }
}

impl Ceiling for Budget {
    fn category(&self) -> &str {
        &self.category
    }

    fn limit(&self) -> Money {
        self.limit
    }

    fn applies_to(&self, month: YearMonth) -> bool {
        self.month == month
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.month, self.category, self.limit)
    }
}

/// A standing monthly ceiling for a category, independent of month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLimit {
    pub id: CategoryLimitId,

    pub category: String,

    /// Ceiling applied to every month
    #[serde(alias = "limit_amount")]
    pub limit: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CategoryLimit {
    pub fn new(category: impl Into<String>, limit: Money) -> Self {
        Self {
            id: CategoryLimitId::new(),
            category: category.into(),
            limit,
            created_at: Some(Utc::now()),
        }
    }

    pub fn validate(&self) -> Result<(), CeilingValidationError> {
        validate_ceiling(&self.category, self.limit)
    }
}

impl Ceiling for CategoryLimit {
    fn category(&self) -> &str {
        &self.category
    }

    fn limit(&self) -> Money {
        self.limit
    }

    fn applies_to(&self, _month: YearMonth) -> bool {
        true
    }
}

impl fmt::Display for CategoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} / month", self.category, self.limit)
    }
}

fn validate_ceiling(category: &str, limit: Money) -> Result<(), CeilingValidationError> {
    if category.trim().is_empty() {
        return Err(CeilingValidationError::MissingCategory);
    }
    if !limit.is_positive() {
        return Err(CeilingValidationError::NonPositiveLimit(limit));
    }
    Ok(())
}

/// Validation errors for budgets and category limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CeilingValidationError {
    MissingCategory,
    NonPositiveLimit(Money),
}

impl fmt::Display for CeilingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "Category is required"),
            Self::NonPositiveLimit(limit) => {
                write!(f, "Limit must be greater than zero (got {})", limit)
            }
        }
    }
}

impl std::error::Error for CeilingValidationError {}
