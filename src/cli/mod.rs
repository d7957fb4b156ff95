//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod export;
pub mod goal;
pub mod import;
pub mod recurring;
pub mod report;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use export::{handle_export_command, ExportArgs};
pub use goal::{handle_goal_command, GoalCommands};
pub use import::{handle_import_command, ImportArgs};
pub use recurring::{handle_recurring_command, RecurringCommands};
pub use report::{handle_report_command, ReportCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{PocketError, PocketResult};
use crate::models::{Money, YearMonth};

/// Parse a user-entered amount ("42", "42.50", "$1,200")
pub(crate) fn parse_amount(input: &str) -> PocketResult<Money> {
    Money::parse(input).map_err(|e| PocketError::Validation(e.to_string()))
}

/// Parse a YYYY-MM-DD date
pub(crate) fn parse_date(input: &str) -> PocketResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        PocketError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", input))
    })
}

/// Parse a YYYY-MM month
pub(crate) fn parse_month(input: &str) -> PocketResult<YearMonth> {
    input.parse().map_err(|e| {
        PocketError::Validation(format!("Invalid month: {}. Use YYYY-MM (e.g., 2025-01)", e))
    })
}

/// Buffered writer for an output file
pub(crate) fn create_output(path: &Path) -> PocketResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        PocketError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Run `write` against the output file if one is given, stdout otherwise
pub(crate) fn with_output<F>(path: Option<&Path>, write: F) -> PocketResult<()>
where
    F: FnOnce(&mut dyn Write) -> PocketResult<()>,
{
    match path {
        Some(path) => {
            let mut writer = create_output(path)?;
            write(&mut writer)?;
            writer
                .flush()
                .map_err(|e| PocketError::Export(e.to_string()))?;
            println!("Written to: {}", path.display());
            Ok(())
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write(&mut lock)
        }
    }
}
