//! Core data models for PocketLens
//!
//! Plain, validated value types for the records the storage collaborator
//! hands over (transactions, budgets, limits, recurring expenses, goals),
//! plus the small calendar types the analytics are keyed by.

pub mod budget;
pub mod goal;
pub mod ids;
pub mod money;
pub mod month;
pub mod period;
pub mod recurring;
pub mod transaction;

pub use budget::{Budget, CategoryLimit, Ceiling, CeilingValidationError};
pub use goal::{FinancialGoal, GoalType};
pub use ids::{BudgetId, CategoryLimitId, GoalId, RecurringExpenseId, TransactionId};
pub use money::Money;
pub use month::YearMonth;
pub use period::{DateRange, PeriodToken};
pub use recurring::{Frequency, RecurringExpense};
pub use transaction::{Transaction, TransactionType};
