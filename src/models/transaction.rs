//! Transaction model
//!
//! Mirrors the storage collaborator's `transactions` rows. The amount is
//! always non-negative; direction lives in [`TransactionType`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::TransactionId;
use super::money::Money;
use super::month::YearMonth;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!(
                "Unknown transaction type '{}' (expected income or expense)",
                other
            )),
        }
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Free-text description (merchant, memo, statement line)
    #[serde(default)]
    pub description: String,

    /// Non-negative amount
    pub amount: Money,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// User- or statement-parser-assigned category label
    pub category: String,

    /// Calendar date, no time component
    pub date: NaiveDate,

    /// When the record was created, if the source tracked it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Create a new transaction with a fresh id
    pub fn new(
        kind: TransactionType,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            description: String::new(),
            amount,
            kind,
            category: category.into(),
            date,
            created_at: Some(Utc::now()),
        }
    }

    /// Shorthand for an expense
    pub fn expense(amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionType::Expense, amount, category, date)
    }

    /// Shorthand for an income
    pub fn income(amount: Money, category: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionType::Income, amount, category, date)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Month key (`YYYY-MM`) this transaction is grouped under
    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }

    /// Whether two records describe the same real-world movement
    ///
    /// Used to skip re-imported statement lines. Ids and creation times are
    /// ignored.
    pub fn same_entry_as(&self, other: &Transaction) -> bool {
        self.date == other.date
            && self.amount == other.amount
            && self.kind == other.kind
            && self.category == other.category
            && self.description.trim() == other.description.trim()
    }

    /// Validate the invariants the analytics rely on
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.kind {
            TransactionType::Income => "+",
            TransactionType::Expense => "-",
        };
        write!(
            f,
            "{} {}{} [{}]",
            self.date.format("%Y-%m-%d"),
            sign,
            self.amount,
            self.category
        )?;
        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }
        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    MissingCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => write!(
                f,
                "Amount must not be negative (got {}); use the transaction type for direction",
                amount
            ),
            Self::MissingCategory => write!(f, "Category is required"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_wire_shape() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "description": "Supermarket",
            "amount": 100,
            "type": "expense",
            "category": "Food",
            "date": "2024-01-05"
        }"#;

        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.amount, Money::from_units(100));
        assert_eq!(txn.kind, TransactionType::Expense);
        assert_eq!(txn.date, jan(5));
        assert_eq!(txn.month().to_string(), "2024-01");
        assert!(txn.created_at.is_none());

        let back = serde_json::to_value(&txn).unwrap();
        assert_eq!(back["type"], "expense");
        assert_eq!(back["date"], "2024-01-05");
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let txn = Transaction::expense(Money::from_cents(-100), "Food", jan(1));
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(Money::from_cents(-100)))
        );

        let blank = Transaction::expense(Money::from_cents(100), "  ", jan(1));
        assert_eq!(
            blank.validate(),
            Err(TransactionValidationError::MissingCategory)
        );
    }

    #[test]
    fn test_same_entry_ignores_ids() {
        let a = Transaction::expense(Money::from_units(12), "Food", jan(3)).with_description("Cafe");
        let b = Transaction::expense(Money::from_units(12), "Food", jan(3)).with_description("Cafe ");
        assert_ne!(a.id, b.id);
        assert!(a.same_entry_as(&b));

        let c = Transaction::income(Money::from_units(12), "Food", jan(3)).with_description("Cafe");
        assert!(!a.same_entry_as(&c));
    }

    #[test]
    fn test_type_parse() {
        assert_eq!("Income".parse::<TransactionType>(), Ok(TransactionType::Income));
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
