//! Statement import
//!
//! The ingestion boundary: loosely typed rows from a statement parser (JSON,
//! possibly wrapped in free-form text) or a CSV export are validated into
//! [`Transaction`]s before anything reaches the analytics. Bad rows are
//! collected with a reason instead of aborting the whole file.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{PocketError, PocketResult};
use crate::models::{Money, Transaction, TransactionId, TransactionType};
use crate::storage::Storage;

/// Amount as it arrives: a JSON number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

/// One unvalidated row
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<RawAmount>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str, String> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(format!("missing {}", field)),
    }
}

impl RawTransaction {
    /// Turn the row into a transaction or explain why it cannot be one
    ///
    /// Negative amounts are rejected rather than sign-flipped; direction
    /// belongs in `type`.
    pub fn validate(&self) -> Result<Transaction, String> {
        let date_text = required(&self.date, "date")?;
        let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
            .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", date_text))?;

        let description = required(&self.description, "description")?;
        let category = required(&self.category, "category")?;
        let kind = TransactionType::from_str(required(&self.kind, "type")?)?;

        let amount = match &self.amount {
            None => return Err("missing amount".into()),
            Some(RawAmount::Number(n)) => {
                Money::try_from_decimal(*n).map_err(|e| format!("invalid amount {}: {}", n, e))?
            }
            Some(RawAmount::Text(text)) => {
                Money::parse(text).map_err(|e| format!("invalid amount '{}': {}", text, e))?
            }
        };
        if amount.is_negative() {
            return Err(format!("negative amount {}", amount));
        }

        Ok(Transaction::new(kind, amount, category, date).with_description(description))
    }
}

/// A row that failed validation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    /// 1-based position in the source (data rows only)
    pub row: usize,
    pub reason: String,
}

/// Parsed input, split into valid transactions and rejects
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub accepted: Vec<Transaction>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportBatch {
    fn from_rows(rows: impl IntoIterator<Item = Result<RawTransaction, String>>) -> Self {
        let mut batch = Self::default();
        for (index, row) in rows.into_iter().enumerate() {
            match row.and_then(|raw| raw.validate()) {
                Ok(txn) => batch.accepted.push(txn),
                Err(reason) => {
                    warn!(row = index + 1, %reason, "rejected import row");
                    batch.rejected.push(RejectedRow {
                        row: index + 1,
                        reason,
                    });
                }
            }
        }
        batch
    }
}

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ImportFormat {
    Json,
    Csv,
}

impl ImportFormat {
    /// Guess from the file extension; anything but `.csv` is treated as JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// The JSON array inside free-form text: first `[` through last `]`
pub fn extract_json_array(text: &str) -> PocketResult<&str> {
    let start = text.find('[');
    let end = text.rfind(']');
    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        _ => Err(PocketError::Import("No JSON array found in input".into())),
    }
}

/// Parse statement-parser output (a JSON array, possibly surrounded by prose)
pub fn parse_statement_json(text: &str) -> PocketResult<ImportBatch> {
    let array = extract_json_array(text)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(array)
        .map_err(|e| PocketError::Import(format!("Malformed JSON array: {}", e)))?;

    Ok(ImportBatch::from_rows(values.into_iter().map(|value| {
        serde_json::from_value::<RawTransaction>(value).map_err(|e| format!("malformed row: {}", e))
    })))
}

const CSV_COLUMNS: [&str; 5] = ["date", "description", "amount", "type", "category"];

/// Parse a CSV with a `date,description,amount,type,category` header
///
/// Column order is free and header names are case-insensitive.
pub fn parse_csv<R: Read>(reader: R) -> PocketResult<ImportBatch> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut positions = [0usize; 5];
    for (slot, column) in positions.iter_mut().zip(CSV_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(column))
            .ok_or_else(|| PocketError::Import(format!("CSV header is missing '{}'", column)))?;
    }
    let [date, description, amount, kind, category] = positions;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let field = |i: usize| {
            record
                .get(i)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        rows.push(Ok(RawTransaction {
            date: field(date),
            description: field(description),
            amount: field(amount).map(RawAmount::Text),
            kind: field(kind),
            category: field(category),
        }));
    }

    Ok(ImportBatch::from_rows(rows))
}

/// Outcome of committing a batch
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResult {
    pub imported: usize,
    pub duplicates_skipped: usize,
    pub rejected: Vec<RejectedRow>,
    pub imported_ids: Vec<TransactionId>,
    pub dry_run: bool,
}

/// Service for statement import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Read and parse a file in the given format
    pub fn parse_file(&self, path: &Path, format: ImportFormat) -> PocketResult<ImportBatch> {
        let file = std::fs::File::open(path)
            .map_err(|e| PocketError::Import(format!("Failed to open {}: {}", path.display(), e)))?;
        match format {
            ImportFormat::Csv => parse_csv(file),
            ImportFormat::Json => {
                let mut text = String::new();
                std::io::BufReader::new(file).read_to_string(&mut text)?;
                parse_statement_json(&text)
            }
        }
    }

    /// Store the accepted transactions, skipping ones already on record
    ///
    /// With `dry_run` nothing is written but the counts are the same.
    pub fn commit(&self, batch: ImportBatch, dry_run: bool) -> PocketResult<ImportResult> {
        let existing = self.storage.transactions.get_all()?;
        let mut result = ImportResult {
            rejected: batch.rejected,
            dry_run,
            ..ImportResult::default()
        };

        let mut fresh = Vec::new();
        for txn in batch.accepted {
            if existing.iter().any(|e| e.same_entry_as(&txn)) {
                result.duplicates_skipped += 1;
                continue;
            }
            result.imported_ids.push(txn.id);
            fresh.push(txn);
        }
        result.imported = fresh.len();

        if !dry_run && !fresh.is_empty() {
            self.storage.transactions.extend(fresh)?;
            self.storage.transactions.save()?;
        }

        info!(
            imported = result.imported,
            duplicates = result.duplicates_skipped,
            rejected = result.rejected.len(),
            dry_run,
            "import finished"
        );
        Ok(result)
    }
}
