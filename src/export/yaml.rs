//! YAML export

use std::io::Write;

use serde::Serialize;

use crate::error::{PocketError, PocketResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

pub fn write_yaml<T: Serialize + ?Sized, W: Write>(value: &T, writer: W) -> PocketResult<()> {
    serde_yaml::to_writer(writer, value).map_err(|e| PocketError::Export(e.to_string()))
}

/// Export the full data directory as YAML, with a short header comment
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> PocketResult<()> {
    let export = FullExport::from_storage(storage)?;

    let header = format!(
        "# PocketLens data export\n# Generated: {}\n# App Version: {}\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| PocketError::Export(e.to_string()))?;

    write_yaml(&export, writer)
}
