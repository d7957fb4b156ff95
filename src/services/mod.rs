//! Service layer for PocketLens
//!
//! Two kinds of service live here. The analytics engine (period, aggregate,
//! trend, outliers, budget, savings, suggestions, patterns, insights,
//! planning) is a set of pure functions over transaction snapshots. The record services
//! (transaction, ceiling, recurring, goals, import) validate and persist
//! through [`crate::storage::Storage`].

pub mod aggregate;
pub mod budget;
pub mod ceiling;
pub mod goals;
pub mod import;
pub mod insights;
pub mod outliers;
pub mod patterns;
pub mod period;
pub mod planning;
pub mod recurring;
pub mod savings;
pub mod suggestions;
pub mod transaction;
pub mod trend;

pub use aggregate::{
    category_aggregates, expense_for_month, filter_range, sum_by_category, sum_by_month,
    sum_by_type, CategoryAggregate, CategoryBucket, MonthlyAggregate, TypeTotals,
};
pub use budget::{Alert, AlertKind, BudgetTracker, CeilingState, CeilingStatus};
pub use ceiling::{CeilingService, RemovedCeiling};
pub use goals::{GoalService, GoalSummary};
pub use import::{ImportFormat, ImportService};
pub use insights::{month_over_month, Insight};
pub use outliers::{detect_outliers, Outlier};
pub use patterns::{detect_patterns, PatternAlert, PatternKind, Severity};
pub use period::PeriodResolver;
pub use planning::{build_plan, SpendingPlan};
pub use recurring::RecurringService;
pub use savings::{suggest_savings, SavingsSuggestion};
pub use suggestions::{spending_tips, SpendingTip, TipKind};
pub use transaction::{CreateTransactionInput, TransactionFilter, TransactionService};
pub use trend::trend_percentage;
