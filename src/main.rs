use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pocketlens::cli::{
    handle_budget_command, handle_export_command, handle_goal_command, handle_import_command,
    handle_recurring_command, handle_report_command, handle_transaction_command,
};
use pocketlens::config::paths::DATA_DIR_ENV;
use pocketlens::config::{PocketPaths, Settings};
use pocketlens::services::PeriodResolver;
use pocketlens::storage::{initialize_storage, Storage};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "POCKETLENS_LOG";

#[derive(Parser)]
#[command(
    name = "pocketlens",
    version,
    about = "Personal finance analytics from the command line",
    long_about = "PocketLens records income and expenses and turns them into \
                  spending insights: category trends, unusual expenses, budget \
                  alerts, month-over-month changes and a recommended spending plan."
)]
struct Cli {
    /// Evaluate periods as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    as_of: Option<String>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Data directory (overrides the platform default)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and default settings
    Init,

    /// Show current configuration and paths
    Config,

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(pocketlens::cli::TransactionCommands),

    /// Import transactions from a statement file
    Import(pocketlens::cli::ImportArgs),

    /// Budget and category limit commands
    #[command(subcommand)]
    Budget(pocketlens::cli::BudgetCommands),

    /// Recurring expense commands
    #[command(subcommand)]
    Recurring(pocketlens::cli::RecurringCommands),

    /// Financial goal commands
    #[command(subcommand)]
    Goal(pocketlens::cli::GoalCommands),

    /// Analytics reports
    #[command(subcommand)]
    Report(pocketlens::cli::ReportCommands),

    /// Export all data
    Export(pocketlens::cli::ExportArgs),
}

fn init_logging(verbose: bool, settings: &Settings) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { settings.log_level.as_str() };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => PocketPaths::with_base_dir(dir),
        None => PocketPaths::new()?,
    };
    let settings = Settings::load_or_create(&paths)?;
    init_logging(cli.verbose, &settings);

    let resolver = match cli.as_of.as_deref() {
        Some(date) => {
            let today = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .with_context(|| format!("Invalid --as-of date: {}. Use YYYY-MM-DD", date))?;
            PeriodResolver::new(today)
        }
        None => PeriodResolver::today_local(),
    };

    let Some(command) = cli.command else {
        println!("PocketLens - personal finance analytics");
        println!();
        println!("Run 'pocketlens --help' for usage information.");
        println!("Run 'pocketlens init' to set up a data directory.");
        return Ok(());
    };

    match command {
        Commands::Init => {
            println!("Initializing PocketLens at: {}", paths.base_dir().display());
            let created = initialize_storage(&paths)?;
            if !created {
                settings.save(&paths)?;
            }
            println!("Initialization complete!");
            println!();
            println!("Record a transaction with 'pocketlens transaction add expense 12.50 Food'");
            println!("or import a statement with 'pocketlens import <file>'.");
            return Ok(());
        }
        Commands::Config => {
            println!("PocketLens Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Default period:  {}", settings.default_period);
            println!("  Log level:       {}", settings.log_level);
            println!("  Plan:");
            for share in &settings.plan {
                println!("    {:<12} {:>4.0}%", share.category, share.share * 100.0);
            }
            return Ok(());
        }
        _ => {}
    }

    let storage = Storage::open(paths)?;

    match command {
        Commands::Transaction(cmd) => {
            handle_transaction_command(&storage, &settings, &resolver, cmd)?;
        }
        Commands::Import(args) => {
            handle_import_command(&storage, args)?;
        }
        Commands::Budget(cmd) => {
            handle_budget_command(&storage, &settings, &resolver, cmd)?;
        }
        Commands::Recurring(cmd) => {
            handle_recurring_command(&storage, &settings, &resolver, cmd)?;
        }
        Commands::Goal(cmd) => {
            handle_goal_command(&storage, &settings, cmd)?;
        }
        Commands::Report(cmd) => {
            handle_report_command(&storage, &settings, &resolver, cmd)?;
        }
        Commands::Export(args) => {
            handle_export_command(&storage, args)?;
        }
        Commands::Init | Commands::Config => {}
    }

    Ok(())
}
