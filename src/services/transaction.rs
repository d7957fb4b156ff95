//! Transaction service
//!
//! Validated create/list/remove over the transaction repository.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{PocketError, PocketResult};
use crate::models::{DateRange, Money, Transaction, TransactionType};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub range: Option<DateRange>,
    pub kind: Option<TransactionType>,
    /// Case-insensitive category match
    pub category: Option<String>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = Some(range);
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn accepts(&self, txn: &Transaction) -> bool {
        self.range.map_or(true, |r| r.contains(txn.date))
            && self.kind.map_or(true, |k| k == txn.kind)
            && self
                .category
                .as_deref()
                .map_or(true, |c| txn.category.eq_ignore_ascii_case(c.trim()))
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub kind: TransactionType,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create and persist a transaction
    pub fn create(&self, input: CreateTransactionInput) -> PocketResult<Transaction> {
        let mut txn = Transaction::new(input.kind, input.amount, input.category.trim(), input.date);
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }

        txn.validate()
            .map_err(|e| PocketError::Validation(e.to_string()))?;

        self.storage.transactions.push(txn.clone())?;
        self.storage.transactions.save()?;
        debug!(id = %txn.id, "transaction created");

        Ok(txn)
    }

    /// Transactions matching the filter, newest first
    pub fn list(&self, filter: &TransactionFilter) -> PocketResult<Vec<Transaction>> {
        let mut transactions: Vec<Transaction> = self
            .storage
            .transactions
            .get_all()?
            .into_iter()
            .filter(|t| filter.accepts(t))
            .collect();

        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    pub fn delete(&self, id: &str) -> PocketResult<Transaction> {
        let removed = self.storage.transactions.remove(id)?;
        self.storage.transactions.save()?;
        debug!(id = %removed.id, "transaction deleted");
        Ok(removed)
    }
}
