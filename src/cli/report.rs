//! Report CLI commands
//!
//! Every report renders as a table by default and can also be written as
//! JSON, YAML or CSV, to stdout or a file.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::{parse_month, with_output};
use crate::config::Settings;
use crate::error::PocketResult;
use crate::export::{write_report, ExportFormat, Report};
use crate::models::PeriodToken;
use crate::reports::{AlertsReport, BudgetStatusReport, InsightsReport, MonthlyReport, PlanReport};
use crate::services::PeriodResolver;
use crate::storage::Storage;

/// Output options shared by every report
#[derive(Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ExportFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for reports over a period
#[derive(Args)]
pub struct PeriodArgs {
    /// Period token: current-month, last-month, last-3-months, last-6-months,
    /// last-year or all-time
    #[arg(short, long)]
    pub period: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Arguments for reports over a single month
#[derive(Args)]
pub struct MonthArgs {
    /// Month (YYYY-MM), defaults to the current month
    #[arg(short, long)]
    pub month: Option<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Totals, category trends, unusual expenses and savings tips
    Insights(PeriodArgs),

    /// Spend against budgets and category limits for a month
    Budget(MonthArgs),

    /// Spending patterns and month-over-month changes
    Alerts(PeriodArgs),

    /// One month compared with the month before
    Monthly(MonthArgs),

    /// Recommended spending split, recurring costs and goals
    Plan(PeriodArgs),
}

fn resolve_period(
    resolver: &PeriodResolver,
    settings: &Settings,
    period: Option<&str>,
) -> PocketResult<PeriodToken> {
    match period {
        Some(token) => Ok(resolver.resolve_str(token)?.0),
        None => Ok(settings.default_period),
    }
}

fn emit<R: Report>(report: &R, output: &OutputArgs, settings: &Settings) -> PocketResult<()> {
    with_output(output.output.as_deref(), |writer| {
        write_report(report, output.format, &settings.currency_symbol, writer)
    })
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    resolver: &PeriodResolver,
    cmd: ReportCommands,
) -> PocketResult<()> {
    match cmd {
        ReportCommands::Insights(args) => {
            let period = resolve_period(resolver, settings, args.period.as_deref())?;
            let report = InsightsReport::generate(storage, resolver, period, settings)?;
            emit(&report, &args.output, settings)
        }

        ReportCommands::Budget(args) => {
            let month = match args.month.as_deref() {
                Some(m) => parse_month(m)?,
                None => resolver.current_month(),
            };
            let report = BudgetStatusReport::generate(storage, month, settings)?;
            emit(&report, &args.output, settings)
        }

        ReportCommands::Alerts(args) => {
            let period = resolve_period(resolver, settings, args.period.as_deref())?;
            let report = AlertsReport::generate(storage, resolver, period, settings)?;
            emit(&report, &args.output, settings)
        }

        ReportCommands::Monthly(args) => {
            let month = match args.month.as_deref() {
                Some(m) => parse_month(m)?,
                None => resolver.current_month(),
            };
            let report = MonthlyReport::generate(storage, month)?;
            emit(&report, &args.output, settings)
        }

        ReportCommands::Plan(args) => {
            let period = resolve_period(resolver, settings, args.period.as_deref())?;
            let report = PlanReport::generate(storage, resolver, period, settings)?;
            emit(&report, &args.output, settings)
        }
    }
}
