//! Generic JSON snapshot repository
//!
//! Each record kind lives in its own file as a plain JSON array, the same
//! row shape the hosted storage returned. Insertion order is preserved: the
//! analytics read per-category value sequences in stored order, and ceilings
//! resolve collisions by last write.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::file_io::{read_json, write_json_atomic};
use crate::error::{PocketError, PocketResult};
use crate::models::{Budget, CategoryLimit, FinancialGoal, RecurringExpense, Transaction};

/// A stored record addressable by id
pub trait Record: Clone + Serialize + DeserializeOwned {
    /// Human name used in messages ("Transaction", "Goal", ...)
    const KIND: &'static str;

    /// Short display form of the id
    fn display_id(&self) -> String;

    /// Whether user input refers to this record
    fn matches_id(&self, input: &str) -> bool;
}

macro_rules! impl_record {
    ($ty:ty, $kind:literal) => {
        impl Record for $ty {
            const KIND: &'static str = $kind;

            fn display_id(&self) -> String {
                self.id.to_string()
            }

            fn matches_id(&self, input: &str) -> bool {
                self.id.matches(input)
            }
        }
    };
}

impl_record!(Transaction, "Transaction");
impl_record!(Budget, "Budget");
impl_record!(CategoryLimit, "Category limit");
impl_record!(RecurringExpense, "Recurring expense");
impl_record!(FinancialGoal, "Goal");

/// Repository over one snapshot file
pub struct Repository<T: Record> {
    path: PathBuf,
    items: RwLock<Vec<T>>,
}

impl<T: Record> Repository<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            items: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> PocketResult<RwLockReadGuard<'_, Vec<T>>> {
        self.items
            .read()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> PocketResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.items
            .write()
            .map_err(|e| PocketError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load the snapshot, replacing anything held in memory
    pub fn load(&self) -> PocketResult<usize> {
        let loaded: Vec<T> = read_json(&self.path)?;
        let count = loaded.len();
        *self.write()? = loaded;
        debug!(kind = T::KIND, count, "records loaded");
        Ok(count)
    }

    /// Write the snapshot back to disk
    pub fn save(&self) -> PocketResult<()> {
        let items = self.read()?;
        write_json_atomic(&self.path, &*items)
    }

    /// All records in stored order
    pub fn get_all(&self) -> PocketResult<Vec<T>> {
        Ok(self.read()?.clone())
    }

    pub fn count(&self) -> PocketResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn push(&self, item: T) -> PocketResult<()> {
        self.write()?.push(item);
        Ok(())
    }

    pub fn extend(&self, items: impl IntoIterator<Item = T>) -> PocketResult<()> {
        self.write()?.extend(items);
        Ok(())
    }

    /// Insert `item`, dropping every stored record that `same_key` matches
    ///
    /// Returns the records that were replaced.
    pub fn replace_where<F>(&self, item: T, same_key: F) -> PocketResult<Vec<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut items = self.write()?;
        let (replaced, kept): (Vec<T>, Vec<T>) = items.drain(..).partition(|t| same_key(t));
        *items = kept;
        items.push(item);
        Ok(replaced)
    }

    fn position(items: &[T], input: &str) -> PocketResult<usize> {
        let matches: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, t)| t.matches_id(input))
            .map(|(i, _)| i)
            .collect();

        match matches.as_slice() {
            [index] => Ok(*index),
            [] => Err(PocketError::NotFound {
                entity_type: T::KIND,
                identifier: input.to_string(),
            }),
            _ => Err(PocketError::Validation(format!(
                "'{}' matches {} {} records; use more of the id",
                input,
                matches.len(),
                T::KIND.to_lowercase()
            ))),
        }
    }

    /// Look a record up by (possibly shortened) id
    pub fn get(&self, input: &str) -> PocketResult<T> {
        let items = self.read()?;
        let index = Self::position(&items, input)?;
        Ok(items[index].clone())
    }

    /// Apply `change` to one record and return the updated copy
    pub fn update<F>(&self, input: &str, change: F) -> PocketResult<T>
    where
        F: FnOnce(&mut T) -> PocketResult<()>,
    {
        let mut items = self.write()?;
        let index = Self::position(&items, input)?;
        let mut updated = items[index].clone();
        change(&mut updated)?;
        items[index] = updated.clone();
        Ok(updated)
    }

    pub fn remove(&self, input: &str) -> PocketResult<T> {
        let mut items = self.write()?;
        let index = Self::position(&items, input)?;
        Ok(items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample(units: i64) -> Transaction {
        Transaction::expense(
            Money::from_units(units),
            "Food",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
    }

    fn repo(temp_dir: &TempDir) -> Repository<Transaction> {
        Repository::new(temp_dir.path().join("transactions.json"))
    }

    #[test]
    fn test_save_and_load_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let first = repo(&temp_dir);
        first.push(sample(3)).unwrap();
        first.push(sample(1)).unwrap();
        first.push(sample(2)).unwrap();
        first.save().unwrap();

        let second = repo(&temp_dir);
        assert_eq!(second.load().unwrap(), 3);
        let amounts: Vec<Money> = second.get_all().unwrap().iter().map(|t| t.amount).collect();
        assert_eq!(
            amounts,
            vec![Money::from_units(3), Money::from_units(1), Money::from_units(2)]
        );
    }

    #[test]
    fn test_get_and_remove_by_short_id() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        let txn = sample(10);
        let short = txn.id.to_string();
        repo.push(txn.clone()).unwrap();

        assert_eq!(repo.get(&short).unwrap(), txn);
        assert_eq!(repo.remove(&short).unwrap(), txn);
        assert!(repo.get(&short).unwrap_err().is_not_found());
    }

    #[test]
    fn test_update() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        let txn = sample(10);
        repo.push(txn.clone()).unwrap();

        let updated = repo
            .update(&txn.id.to_string(), |t| {
                t.category = "Groceries".into();
                Ok(())
            })
            .unwrap();
        assert_eq!(updated.category, "Groceries");
        assert_eq!(repo.get_all().unwrap()[0].category, "Groceries");
    }

    #[test]
    fn test_failed_update_leaves_record_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        let txn = sample(10);
        repo.push(txn.clone()).unwrap();

        let result = repo.update(&txn.id.to_string(), |t| {
            t.category.clear();
            Err(PocketError::Validation("nope".into()))
        });
        assert!(result.is_err());
        assert_eq!(repo.get_all().unwrap()[0], txn);
    }

    #[test]
    fn test_replace_where_moves_item_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let repo = repo(&temp_dir);
        repo.push(sample(1)).unwrap();
        repo.push(sample(2)).unwrap();

        let replaced = repo
            .replace_where(sample(9), |t| t.amount == Money::from_units(1))
            .unwrap();
        assert_eq!(replaced.len(), 1);

        let amounts: Vec<Money> = repo.get_all().unwrap().iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![Money::from_units(2), Money::from_units(9)]);
    }
}
