//! JSON export
//!
//! Pretty-printed JSON for reports, and a full snapshot of the stored data
//! with schema versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PocketError, PocketResult};
use crate::models::{Budget, CategoryLimit, FinancialGoal, RecurringExpense, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Serialize any value as pretty JSON followed by a newline
pub fn write_json<T: Serialize + ?Sized, W: Write>(value: &T, mut writer: W) -> PocketResult<()> {
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| PocketError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| PocketError::Export(e.to_string()))
}

/// Everything in the data directory, in one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub category_limits: Vec<CategoryLimit>,
    pub recurring: Vec<RecurringExpense>,
    pub goals: Vec<FinancialGoal>,

    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,

    /// Earliest transaction date, if any
    pub earliest_transaction: Option<String>,

    /// Latest transaction date, if any
    pub latest_transaction: Option<String>,
}

impl FullExport {
    pub fn from_storage(storage: &Storage) -> PocketResult<Self> {
        let transactions = storage.transactions.get_all()?;

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            earliest_transaction: transactions.iter().map(|t| t.date).min().map(|d| d.to_string()),
            latest_transaction: transactions.iter().map(|t| t.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budgets: storage.budgets.get_all()?,
            category_limits: storage.limits.get_all()?,
            recurring: storage.recurring.get_all()?,
            goals: storage.goals.get_all()?,
            metadata,
        })
    }

    /// Check the schema version of a previously written export
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        if self.metadata.transaction_count != self.transactions.len() {
            return Err(format!(
                "Metadata lists {} transactions but the export holds {}",
                self.metadata.transaction_count,
                self.transactions.len()
            ));
        }
        Ok(())
    }
}

/// Export the full data directory as JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W) -> PocketResult<()> {
    let export = FullExport::from_storage(storage)?;
    write_json(&export, writer)
}

/// Read back a JSON export
pub fn import_from_json(json_str: &str) -> PocketResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| PocketError::Import(e.to_string()))?;
    export.validate().map_err(PocketError::Import)?;
    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketPaths;
    use crate::models::{Money, YearMonth};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(PocketPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_full_export_roundtrip() {
        let (_temp_dir, storage) = create_test_storage();
        let jan = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        storage
            .transactions
            .extend(vec![
                Transaction::expense(Money::from_units(40), "Food", jan(3)),
                Transaction::income(Money::from_units(2000), "Salary", jan(28)),
            ])
            .unwrap();
        storage
            .budgets
            .push(Budget::new("Food", Money::from_units(300), YearMonth::new(2024, 1).unwrap()))
            .unwrap();

        let mut buffer = Vec::new();
        export_full_json(&storage, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let export = import_from_json(&text).unwrap();
        assert_eq!(export.transactions.len(), 2);
        assert_eq!(export.budgets.len(), 1);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2024-01-03"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2024-01-28"));
    }

    #[test]
    fn test_schema_mismatch_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let mut export = FullExport::from_storage(&storage).unwrap();
        export.schema_version = "0.1.0".into();
        let text = serde_json::to_string(&export).unwrap();

        let err = import_from_json(&text).unwrap_err();
        assert!(err.to_string().contains("Schema version mismatch"));
    }

    #[test]
    fn test_write_json_is_pretty() {
        let mut buffer = Vec::new();
        write_json(&serde_json::json!({"a": 1}), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
