//! Storage initialization
//!
//! First-run setup: default settings plus empty snapshot files.

use tracing::info;

use crate::config::paths::PocketPaths;
use crate::config::Settings;
use crate::error::PocketError;
use crate::models::{Budget, CategoryLimit, FinancialGoal, RecurringExpense, Transaction};

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left alone. Returns `true` when settings were created.
pub fn initialize_storage(paths: &PocketPaths) -> Result<bool, PocketError> {
    paths.ensure_directories()?;

    write_if_missing::<Transaction>(paths.transactions_file())?;
    write_if_missing::<Budget>(paths.budgets_file())?;
    write_if_missing::<CategoryLimit>(paths.category_limits_file())?;
    write_if_missing::<RecurringExpense>(paths.recurring_file())?;
    write_if_missing::<FinancialGoal>(paths.goals_file())?;

    if paths.is_initialized() {
        return Ok(false);
    }

    Settings::default().save(paths)?;
    info!(base_dir = %paths.base_dir().display(), "initialized data directory");
    Ok(true)
}

fn write_if_missing<T: serde::Serialize>(path: std::path::PathBuf) -> Result<(), PocketError> {
    if path.exists() {
        return Ok(());
    }
    write_json_atomic(&path, &Vec::<T>::new())
}
