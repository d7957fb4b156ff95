//! Financial goal CLI commands

use clap::Subcommand;

use super::{parse_amount, parse_date};
use crate::config::Settings;
use crate::display::format_goal_table;
use crate::error::PocketResult;
use crate::models::{FinancialGoal, GoalType};
use crate::services::GoalService;
use crate::storage::Storage;

/// Goal subcommands
#[derive(Subcommand)]
pub enum GoalCommands {
    /// Add a savings goal
    Add {
        /// Goal name
        name: String,
        /// Target amount
        target: String,
        /// Target date (YYYY-MM-DD)
        #[arg(short, long)]
        due: String,
        /// vacation, emergency_fund, debt_payoff, investment, purchase or other
        #[arg(short = 't', long = "type", default_value = "other")]
        goal_type: GoalType,
        /// Amount already saved
        #[arg(short, long)]
        saved: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List goals by target date
    #[command(alias = "ls")]
    List,

    /// Record how much has been saved so far
    Progress {
        id: String,
        /// Total saved towards the goal
        amount: String,
    },

    /// Delete a goal by ID (or unique ID prefix)
    #[command(alias = "rm")]
    Remove { id: String },
}

/// Handle a goal command
pub fn handle_goal_command(storage: &Storage, settings: &Settings, cmd: GoalCommands) -> PocketResult<()> {
    let service = GoalService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        GoalCommands::Add {
            name,
            target,
            due,
            goal_type,
            saved,
            description,
        } => {
            let mut goal = FinancialGoal::new(
                name.trim(),
                goal_type,
                parse_amount(&target)?,
                parse_date(&due)?,
            );
            if let Some(saved) = saved {
                goal.current_amount = parse_amount(&saved)?;
            }
            goal.description = description;

            let goal = service.create(goal)?;
            println!(
                "Added goal {}: {} by {}",
                goal.name,
                goal.target_amount.format_with_symbol(symbol),
                goal.target_date
            );
            println!("  ID: {}", goal.id);
        }

        GoalCommands::List => {
            let goals = service.list()?;
            print!("{}", format_goal_table(&goals, symbol));
            if !goals.is_empty() {
                let summary = service.summary()?;
                println!(
                    "Saved {} of {} across {} active goals ({:.0}%)",
                    summary.total_saved.format_with_symbol(symbol),
                    summary.total_target.format_with_symbol(symbol),
                    summary.active,
                    summary.overall_progress
                );
            }
        }

        GoalCommands::Progress { id, amount } => {
            let goal = service.set_progress(&id, parse_amount(&amount)?)?;
            println!(
                "{}: {} saved, {} to go ({:.0}%)",
                goal.name,
                goal.current_amount.format_with_symbol(symbol),
                goal.remaining().format_with_symbol(symbol),
                goal.progress_percent()
            );
        }

        GoalCommands::Remove { id } => {
            let removed = service.delete(&id)?;
            println!("Deleted goal {}", removed.name);
        }
    }

    Ok(())
}
