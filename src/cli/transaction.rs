//! Transaction CLI commands

use std::io::Write;

use clap::Subcommand;

use super::{parse_amount, parse_date, with_output};
use crate::config::Settings;
use crate::display::format_transaction_table;
use crate::error::{PocketError, PocketResult};
use crate::export::{export_transactions_csv, write_json, write_yaml, ExportFormat};
use crate::models::TransactionType;
use crate::services::{CreateTransactionInput, PeriodResolver, TransactionFilter, TransactionService};
use crate::storage::Storage;

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record an income or expense
    Add {
        /// income or expense
        kind: TransactionType,
        /// Amount (e.g., "42" or "42.50"); always positive
        amount: String,
        /// Category label
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Free-text description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// List transactions, newest first
    #[command(alias = "ls")]
    List {
        /// Period token (e.g., "current-month", "last-6-months")
        #[arg(short, long)]
        period: Option<String>,
        /// Only income or only expense
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: ExportFormat,
    },

    /// Delete a transaction by ID (or unique ID prefix)
    #[command(alias = "rm")]
    Remove { id: String },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    resolver: &PeriodResolver,
    cmd: TransactionCommands,
) -> PocketResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::Add {
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let amount = parse_amount(&amount)?;
            if amount.is_negative() {
                return Err(PocketError::Validation(
                    "Amount must not be negative; use the type to record direction".into(),
                ));
            }
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => resolver.today(),
            };

            let txn = service.create(CreateTransactionInput {
                kind,
                amount,
                category,
                date,
                description,
            })?;

            println!(
                "Recorded {} of {} in {} on {}",
                txn.kind,
                txn.amount.format_with_symbol(&settings.currency_symbol),
                txn.category,
                txn.date
            );
            println!("  ID: {}", txn.id);
        }

        TransactionCommands::List {
            period,
            kind,
            category,
            limit,
            format,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(token) = period {
                let (_, range) = resolver.resolve_str(&token)?;
                filter = filter.range(range);
            }
            if let Some(kind) = kind {
                filter = filter.kind(kind);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }

            let transactions = service.list(&filter)?;
            with_output(None, |w| match format {
                ExportFormat::Table => w
                    .write_all(
                        format_transaction_table(&transactions, &settings.currency_symbol)
                            .as_bytes(),
                    )
                    .map_err(PocketError::from),
                ExportFormat::Json => write_json(&transactions, w),
                ExportFormat::Yaml => write_yaml(&transactions, w),
                ExportFormat::Csv => export_transactions_csv(&transactions, w),
            })?;
        }

        TransactionCommands::Remove { id } => {
            let removed = service.delete(&id)?;
            println!(
                "Deleted {} of {} in {} on {}",
                removed.kind,
                removed.amount.format_with_symbol(&settings.currency_symbol),
                removed.category,
                removed.date
            );
        }
    }

    Ok(())
}
