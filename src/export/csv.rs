//! CSV export

use std::io::Write;

use serde::Serialize;

use crate::error::{PocketError, PocketResult};
use crate::models::Transaction;

/// Write serializable rows with a header taken from the first row's fields
pub fn write_rows<T: Serialize, W: Write>(rows: &[T], writer: W) -> PocketResult<()> {
    let mut csv_writer = ::csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| PocketError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| PocketError::Export(e.to_string()))
}

#[derive(Serialize)]
struct TransactionRecord<'a> {
    id: String,
    date: String,
    description: &'a str,
    amount: String,
    #[serde(rename = "type")]
    kind: &'static str,
    category: &'a str,
}

/// Export transactions in the same column layout the CSV importer reads
pub fn export_transactions_csv<W: Write>(transactions: &[Transaction], writer: W) -> PocketResult<()> {
    let rows: Vec<TransactionRecord> = transactions
        .iter()
        .map(|txn| TransactionRecord {
            id: txn.id.as_uuid().to_string(),
            date: txn.date.to_string(),
            description: &txn.description,
            amount: format!("{:.2}", txn.amount.as_f64()),
            kind: txn.kind.as_str(),
            category: &txn.category,
        })
        .collect();
    write_rows(&rows, writer)
}
