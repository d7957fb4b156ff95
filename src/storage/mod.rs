//! Storage layer for PocketLens
//!
//! Local stand-in for the hosted storage collaborator: one JSON snapshot per
//! record kind, atomic writes, and missing files treated as empty.

pub mod file_io;
pub mod init;
pub mod repository;

pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use repository::{Record, Repository};

use tracing::info;

use crate::config::paths::PocketPaths;
use crate::error::PocketError;
use crate::models::{Budget, CategoryLimit, FinancialGoal, RecurringExpense, Transaction};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: PocketPaths,
    pub transactions: Repository<Transaction>,
    pub budgets: Repository<Budget>,
    pub limits: Repository<CategoryLimit>,
    pub recurring: Repository<RecurringExpense>,
    pub goals: Repository<FinancialGoal>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: PocketPaths) -> Result<Self, PocketError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: Repository::new(paths.transactions_file()),
            budgets: Repository::new(paths.budgets_file()),
            limits: Repository::new(paths.category_limits_file()),
            recurring: Repository::new(paths.recurring_file()),
            goals: Repository::new(paths.goals_file()),
            paths,
        })
    }

    /// Create and load in one step
    pub fn open(paths: PocketPaths) -> Result<Self, PocketError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), PocketError> {
        let transactions = self.transactions.load()?;
        let budgets = self.budgets.load()?;
        let limits = self.limits.load()?;
        let recurring = self.recurring.load()?;
        let goals = self.goals.load()?;
        info!(
            transactions,
            budgets, limits, recurring, goals, "storage loaded"
        );
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), PocketError> {
        self.transactions.save()?;
        self.budgets.save()?;
        self.limits.save()?;
        self.recurring.save()?;
        self.goals.save()?;
        Ok(())
    }

    /// Check if `init` has been run
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_all_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::open(paths.clone()).unwrap();
        storage
            .transactions
            .push(Transaction::expense(
                Money::from_units(12),
                "Food",
                NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
            ))
            .unwrap();
        storage
            .limits
            .push(CategoryLimit::new("Food", Money::from_units(300)))
            .unwrap();
        storage.save_all().unwrap();

        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.transactions.count().unwrap(), 1);
        assert_eq!(reopened.limits.count().unwrap(), 1);
        assert_eq!(reopened.goals.count().unwrap(), 0);
    }
}
