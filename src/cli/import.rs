//! Statement import command

use std::path::PathBuf;

use clap::Args;

use crate::error::PocketResult;
use crate::services::{ImportFormat, ImportService};
use crate::storage::Storage;

/// Arguments for `pocketlens import`
#[derive(Args)]
pub struct ImportArgs {
    /// Statement file: a JSON array (optionally wrapped in other text) or CSV
    pub file: PathBuf,

    /// Input format; guessed from the file extension when omitted
    #[arg(short, long, value_enum)]
    pub format: Option<ImportFormat>,

    /// Validate and count without saving anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, args: ImportArgs) -> PocketResult<()> {
    let service = ImportService::new(storage);
    let format = args
        .format
        .unwrap_or_else(|| ImportFormat::from_path(&args.file));

    let batch = service.parse_file(&args.file, format)?;
    let result = service.commit(batch, args.dry_run)?;

    if result.dry_run {
        println!("Dry run: nothing was saved.");
    }
    println!(
        "Imported {} transaction(s) from {} ({})",
        result.imported,
        args.file.display(),
        format
    );
    if result.duplicates_skipped > 0 {
        println!("Skipped {} duplicate(s)", result.duplicates_skipped);
    }
    if !result.rejected.is_empty() {
        println!("Rejected {} row(s):", result.rejected.len());
        for row in &result.rejected {
            println!("  row {}: {}", row.row, row.reason);
        }
    }

    Ok(())
}
