//! Full data export command

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::with_output;
use crate::error::PocketResult;
use crate::export::{export_full_json, export_full_yaml, export_transactions_csv};
use crate::storage::Storage;

/// File formats for a full export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DataFormat {
    /// Everything, pretty-printed JSON
    #[default]
    Json,
    /// Everything, YAML
    Yaml,
    /// Transactions only
    Csv,
}

/// Arguments for `pocketlens export`
#[derive(Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: DataFormat,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(storage: &Storage, args: ExportArgs) -> PocketResult<()> {
    with_output(args.output.as_deref(), |writer| match args.format {
        DataFormat::Json => export_full_json(storage, writer),
        DataFormat::Yaml => export_full_yaml(storage, writer),
        DataFormat::Csv => export_transactions_csv(&storage.transactions.get_all()?, writer),
    })
}
