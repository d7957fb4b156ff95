//! Financial goal service

use serde::Serialize;
use tracing::debug;

use crate::error::{PocketError, PocketResult};
use crate::models::{FinancialGoal, Money};
use crate::storage::Storage;

/// Totals across all active goals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalSummary {
    pub active: usize,
    pub completed: usize,
    pub total_saved: Money,
    pub total_target: Money,
    /// `total_saved / total_target * 100`, 0 with no target
    pub overall_progress: f64,
}

impl GoalSummary {
    pub fn from_goals(goals: &[FinancialGoal]) -> Self {
        let active: Vec<&FinancialGoal> = goals.iter().filter(|g| g.is_active).collect();
        let total_saved: Money = active.iter().map(|g| g.current_amount).sum();
        let total_target: Money = active.iter().map(|g| g.target_amount).sum();
        let overall_progress = if total_target.is_positive() {
            total_saved.cents() as f64 * 100.0 / total_target.cents() as f64
        } else {
            0.0
        };

        Self {
            active: active.len(),
            completed: active.iter().filter(|g| g.is_complete()).count(),
            total_saved,
            total_target,
            overall_progress,
        }
    }
}

pub struct GoalService<'a> {
    storage: &'a Storage,
}

impl<'a> GoalService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, goal: FinancialGoal) -> PocketResult<FinancialGoal> {
        goal.validate().map_err(PocketError::Validation)?;
        if goal.current_amount.is_negative() || goal.current_amount > goal.target_amount {
            return Err(PocketError::Validation(format!(
                "Saved amount must be between {} and {}",
                Money::zero(),
                goal.target_amount
            )));
        }

        self.storage.goals.push(goal.clone())?;
        self.storage.goals.save()?;
        debug!(id = %goal.id, "goal created");
        Ok(goal)
    }

    /// Goals ordered by target date
    pub fn list(&self) -> PocketResult<Vec<FinancialGoal>> {
        let mut goals = self.storage.goals.get_all()?;
        goals.sort_by_key(|g| g.target_date);
        Ok(goals)
    }

    /// Record how much has been saved towards a goal
    pub fn set_progress(&self, id: &str, amount: Money) -> PocketResult<FinancialGoal> {
        let updated = self.storage.goals.update(id, |goal| {
            goal.set_progress(amount).map_err(PocketError::Validation)
        })?;
        self.storage.goals.save()?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> PocketResult<FinancialGoal> {
        let removed = self.storage.goals.remove(id)?;
        self.storage.goals.save()?;
        Ok(removed)
    }

    pub fn summary(&self) -> PocketResult<GoalSummary> {
        Ok(GoalSummary::from_goals(&self.storage.goals.get_all()?))
    }
}
