//! Recurring expense service
//!
//! Subscriptions and other repeating charges, normalised to a monthly
//! commitment.

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::error::{PocketError, PocketResult};
use crate::models::{Money, RecurringExpense};
use crate::storage::Storage;

/// Monthly commitment across every active recurring expense
pub fn monthly_total(expenses: &[RecurringExpense]) -> Money {
    expenses
        .iter()
        .filter(|e| e.is_active)
        .map(RecurringExpense::monthly_equivalent)
        .sum()
}

/// Active expenses charged within `days` days of `today`, soonest first
pub fn upcoming(expenses: &[RecurringExpense], today: NaiveDate, days: i64) -> Vec<RecurringExpense> {
    let horizon = today + Duration::days(days);
    let mut due: Vec<RecurringExpense> = expenses
        .iter()
        .filter(|e| e.is_active && e.next_charge_date >= today && e.next_charge_date <= horizon)
        .cloned()
        .collect();
    due.sort_by_key(|e| e.next_charge_date);
    due
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringSummary {
    pub active: usize,
    pub monthly_total: Money,
    pub upcoming: Vec<RecurringExpense>,
}

impl RecurringSummary {
    pub fn from_expenses(expenses: &[RecurringExpense], today: NaiveDate, days: i64) -> Self {
        Self {
            active: expenses.iter().filter(|e| e.is_active).count(),
            monthly_total: monthly_total(expenses),
            upcoming: upcoming(expenses, today, days),
        }
    }
}

pub struct RecurringService<'a> {
    storage: &'a Storage,
}

impl<'a> RecurringService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(&self, expense: RecurringExpense) -> PocketResult<RecurringExpense> {
        expense.validate().map_err(PocketError::Validation)?;

        self.storage.recurring.push(expense.clone())?;
        self.storage.recurring.save()?;
        debug!(id = %expense.id, "recurring expense created");
        Ok(expense)
    }

    /// All recurring expenses, soonest charge first
    pub fn list(&self) -> PocketResult<Vec<RecurringExpense>> {
        let mut expenses = self.storage.recurring.get_all()?;
        expenses.sort_by_key(|e| e.next_charge_date);
        Ok(expenses)
    }

    pub fn set_active(&self, id: &str, active: bool) -> PocketResult<RecurringExpense> {
        let updated = self.storage.recurring.update(id, |e| {
            e.is_active = active;
            Ok(())
        })?;
        self.storage.recurring.save()?;
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> PocketResult<RecurringExpense> {
        let removed = self.storage.recurring.remove(id)?;
        self.storage.recurring.save()?;
        Ok(removed)
    }

    pub fn summary(&self, today: NaiveDate, days: i64) -> PocketResult<RecurringSummary> {
        let expenses = self.storage.recurring.get_all()?;
        Ok(RecurringSummary::from_expenses(&expenses, today, days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PocketPaths;
    use crate::models::Frequency;
    use tempfile::TempDir;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn expense(units: i64, frequency: Frequency, next: NaiveDate) -> RecurringExpense {
        RecurringExpense::new("Sub", Money::from_units(units), "Subscriptions", frequency, next)
    }

    #[test]
    fn test_monthly_total_skips_inactive() {
        let mut paused = expense(100, Frequency::Monthly, date(1, 1));
        paused.is_active = false;
        let expenses = vec![
            expense(10, Frequency::Monthly, date(1, 1)),
            expense(120, Frequency::Yearly, date(1, 1)),
            expense(30, Frequency::Quarterly, date(1, 1)),
            paused,
        ];
        // 10 + 10 + 7.50
        assert_eq!(monthly_total(&expenses), Money::from_cents(2750));
    }

    #[test]
    fn test_upcoming_window() {
        let expenses = vec![
            expense(1, Frequency::Monthly, date(3, 20)),
            expense(2, Frequency::Monthly, date(3, 10)),
            expense(3, Frequency::Monthly, date(3, 9)),
            expense(4, Frequency::Monthly, date(4, 30)),
        ];
        let due = upcoming(&expenses, date(3, 10), 10);
        let amounts: Vec<Money> = due.iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![Money::from_units(2), Money::from_units(1)]);
    }

    #[test]
    fn test_service_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(PocketPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = RecurringService::new(&storage);

        let created = service
            .create(expense(15, Frequency::Monthly, date(3, 15)))
            .unwrap();
        service.set_active(&created.id.to_string(), false).unwrap();

        let summary = service.summary(date(3, 1), 30).unwrap();
        assert_eq!(summary.active, 0);
        assert!(summary.monthly_total.is_zero());

        service.delete(&created.id.to_string()).unwrap();
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_validates() {
        let temp_dir = TempDir::new().unwrap();
        let storage = Storage::open(PocketPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = RecurringService::new(&storage);

        let err = service
            .create(expense(0, Frequency::Monthly, date(3, 15)))
            .unwrap_err();
        assert!(err.is_validation());
    }
}
