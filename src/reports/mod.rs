//! Reports module for PocketLens
//!
//! Each report is assembled from a storage snapshot by a pure `build`
//! function and rendered through [`crate::export::Report`]:
//! spending insights, budget status, alerts, a monthly summary and the
//! spending plan.

pub mod alerts;
pub mod budget_status;
pub mod insights;
pub mod monthly;
pub mod plan;

pub use alerts::AlertsReport;
pub use budget_status::BudgetStatusReport;
pub use insights::InsightsReport;
pub use monthly::{MonthlyCategoryRow, MonthlyReport};
pub use plan::PlanReport;
