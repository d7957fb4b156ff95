//! Recurring expense CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::Settings;
use crate::display::format_recurring_table;
use crate::error::PocketResult;
use crate::models::{Frequency, RecurringExpense};
use crate::services::recurring::monthly_total;
use crate::services::{PeriodResolver, RecurringService};
use crate::storage::Storage;

/// Recurring expense subcommands
#[derive(Subcommand)]
pub enum RecurringCommands {
    /// Add a subscription or other repeating charge
    Add {
        /// What the charge is for
        description: String,
        /// Amount per charge
        amount: String,
        /// Category label
        category: String,
        /// daily, weekly, monthly, quarterly or yearly
        #[arg(short, long, default_value = "monthly")]
        frequency: Frequency,
        /// Next charge date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        next: Option<String>,
        /// Notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// List recurring expenses, soonest charge first
    #[command(alias = "ls")]
    List,

    /// Stop counting an expense without deleting it
    Pause { id: String },

    /// Count a paused expense again
    Resume { id: String },

    /// Delete a recurring expense by ID (or unique ID prefix)
    #[command(alias = "rm")]
    Remove { id: String },
}

/// Handle a recurring expense command
pub fn handle_recurring_command(
    storage: &Storage,
    settings: &Settings,
    resolver: &PeriodResolver,
    cmd: RecurringCommands,
) -> PocketResult<()> {
    let service = RecurringService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        RecurringCommands::Add {
            description,
            amount,
            category,
            frequency,
            next,
            notes,
        } => {
            let next_charge_date = match next {
                Some(d) => parse_date(&d)?,
                None => resolver.today(),
            };
            let mut expense = RecurringExpense::new(
                description.trim(),
                parse_amount(&amount)?,
                category.trim(),
                frequency,
                next_charge_date,
            );
            expense.notes = notes;

            let expense = service.create(expense)?;
            println!(
                "Added {} ({} per month)",
                expense,
                expense.monthly_equivalent().format_with_symbol(symbol)
            );
            println!("  ID: {}", expense.id);
        }

        RecurringCommands::List => {
            let expenses = service.list()?;
            print!("{}", format_recurring_table(&expenses, symbol));
            if !expenses.is_empty() {
                println!(
                    "Monthly commitment: {}",
                    monthly_total(&expenses).format_with_symbol(symbol)
                );
            }
        }

        RecurringCommands::Pause { id } => {
            let expense = service.set_active(&id, false)?;
            println!("Paused {}", expense.description);
        }

        RecurringCommands::Resume { id } => {
            let expense = service.set_active(&id, true)?;
            println!("Resumed {}", expense.description);
        }

        RecurringCommands::Remove { id } => {
            let removed = service.delete(&id)?;
            println!("Deleted {}", removed.description);
        }
    }

    Ok(())
}
