//! Budget CLI commands
//!
//! Monthly budgets and standing category limits.

use clap::Subcommand;

use super::{parse_amount, parse_month};
use crate::config::Settings;
use crate::display::format_ceiling_table;
use crate::error::PocketResult;
use crate::services::{CeilingService, PeriodResolver, RemovedCeiling};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the budget for a category in one month
    Set {
        /// Category label
        category: String,
        /// Spending ceiling (e.g., "300" or "300.00")
        amount: String,
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Set a standing monthly limit for a category
    Limit {
        /// Category label
        category: String,
        /// Spending ceiling applied to every month
        amount: String,
    },

    /// List budgets and category limits
    #[command(alias = "ls")]
    List {
        /// Only budgets for this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete a budget or limit by ID (or unique ID prefix)
    #[command(alias = "rm")]
    Remove { id: String },
}

/// Handle a budget command
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    resolver: &PeriodResolver,
    cmd: BudgetCommands,
) -> PocketResult<()> {
    let service = CeilingService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set {
            category,
            amount,
            month,
        } => {
            let month = match month {
                Some(m) => parse_month(&m)?,
                None => resolver.current_month(),
            };
            let write = service.set_budget(&category, parse_amount(&amount)?, month)?;
            let verb = if write.replaced { "Updated" } else { "Set" };
            println!(
                "{} budget for {} in {}: {}",
                verb,
                write.saved.category,
                month,
                write.saved.limit.format_with_symbol(symbol)
            );
            println!("  ID: {}", write.saved.id);
        }

        BudgetCommands::Limit { category, amount } => {
            let write = service.set_limit(&category, parse_amount(&amount)?)?;
            let verb = if write.replaced { "Updated" } else { "Set" };
            println!(
                "{} monthly limit for {}: {}",
                verb,
                write.saved.category,
                write.saved.limit.format_with_symbol(symbol)
            );
            println!("  ID: {}", write.saved.id);
        }

        BudgetCommands::List { month } => {
            let month = month.as_deref().map(parse_month).transpose()?;
            let budgets = service.budgets(month)?;
            let limits = service.limits()?;
            print!("{}", format_ceiling_table(&budgets, &limits, symbol));
        }

        BudgetCommands::Remove { id } => match service.remove(&id)? {
            RemovedCeiling::Budget(budget) => {
                println!("Deleted budget for {} in {}", budget.category, budget.month);
            }
            RemovedCeiling::Limit(limit) => {
                println!("Deleted monthly limit for {}", limit.category);
            }
        },
    }

    Ok(())
}
