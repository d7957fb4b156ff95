//! Budget and category-limit management
//!
//! Writes go through last-write-wins: a budget replaces any stored budget
//! for the same category and month, a limit any limit for the same category.
//! Categories compare case-insensitively.

use tracing::{debug, info};

use crate::error::{PocketError, PocketResult};
use crate::models::{Budget, CategoryLimit, Money, YearMonth};
use crate::storage::Storage;

/// Result of a budget or limit write
#[derive(Debug, Clone)]
pub struct CeilingWrite<T> {
    pub saved: T,
    /// Whether an earlier record for the same key was replaced
    pub replaced: bool,
}

/// Either kind of ceiling, as removed by id
#[derive(Debug, Clone)]
pub enum RemovedCeiling {
    Budget(Budget),
    Limit(CategoryLimit),
}

pub struct CeilingService<'a> {
    storage: &'a Storage,
}

fn same_category(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl<'a> CeilingService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the budget for a category in a month
    pub fn set_budget(
        &self,
        category: &str,
        limit: Money,
        month: YearMonth,
    ) -> PocketResult<CeilingWrite<Budget>> {
        let budget = Budget::new(category.trim(), limit, month);
        budget
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        let replaced = self.storage.budgets.replace_where(budget.clone(), |b| {
            b.month == month && same_category(&b.category, category)
        })?;
        self.storage.budgets.save()?;

        if !replaced.is_empty() {
            info!(category = %budget.category, %month, "budget replaced");
        }
        debug!(id = %budget.id, "budget saved");

        Ok(CeilingWrite {
            saved: budget,
            replaced: !replaced.is_empty(),
        })
    }

    /// Set the standing monthly limit for a category
    pub fn set_limit(&self, category: &str, limit: Money) -> PocketResult<CeilingWrite<CategoryLimit>> {
        let standing = CategoryLimit::new(category.trim(), limit);
        standing
            .validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        let replaced = self
            .storage
            .limits
            .replace_where(standing.clone(), |l| same_category(&l.category, category))?;
        self.storage.limits.save()?;

        if !replaced.is_empty() {
            info!(category = %standing.category, "category limit replaced");
        }

        Ok(CeilingWrite {
            saved: standing,
            replaced: !replaced.is_empty(),
        })
    }

    /// Budgets, optionally only those for one month
    pub fn budgets(&self, month: Option<YearMonth>) -> PocketResult<Vec<Budget>> {
        Ok(self
            .storage
            .budgets
            .get_all()?
            .into_iter()
            .filter(|b| month.map_or(true, |m| b.month == m))
            .collect())
    }

    pub fn limits(&self) -> PocketResult<Vec<CategoryLimit>> {
        self.storage.limits.get_all()
    }

    /// Remove a budget or a limit by id
    pub fn remove(&self, id: &str) -> PocketResult<RemovedCeiling> {
        match self.storage.budgets.remove(id) {
            Ok(budget) => {
                self.storage.budgets.save()?;
                return Ok(RemovedCeiling::Budget(budget));
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e),
        }

        match self.storage.limits.remove(id) {
            Ok(standing) => {
                self.storage.limits.save()?;
                Ok(RemovedCeiling::Limit(standing))
            }
            Err(e) if e.is_not_found() => Err(PocketError::ceiling_not_found(id)),
            Err(e) => Err(e),
        }
    }
}
