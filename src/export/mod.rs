//! Export module for PocketLens
//!
//! Renders reports and stored data in the formats the front end offers:
//! - Table: the human-readable terminal layout
//! - JSON: pretty-printed, for scripts
//! - YAML: human-readable, with a header comment
//! - CSV: flat rows for spreadsheets

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_transactions_csv, write_rows};
pub use json::{export_full_json, write_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, write_yaml};

use std::io::Write;

use serde::Serialize;

use crate::error::{PocketError, PocketResult};

/// Output format for reports and exports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Table,
    Json,
    Yaml,
    Csv,
}

/// A report that can be rendered in every [`ExportFormat`]
pub trait Report: Serialize {
    /// Human-readable layout, money shown with `symbol`
    fn format_terminal(&self, symbol: &str) -> String;

    /// Flat CSV rendering of the report's main rows
    fn export_csv<W: Write>(&self, writer: W) -> PocketResult<()>;
}

/// Write `report` to `writer` in the requested format
pub fn write_report<R: Report, W: Write>(
    report: &R,
    format: ExportFormat,
    symbol: &str,
    mut writer: W,
) -> PocketResult<()> {
    match format {
        ExportFormat::Table => writer
            .write_all(report.format_terminal(symbol).as_bytes())
            .map_err(|e| PocketError::Export(e.to_string())),
        ExportFormat::Json => write_json(report, writer),
        ExportFormat::Yaml => write_yaml(report, writer),
        ExportFormat::Csv => report.export_csv(writer),
    }
}
