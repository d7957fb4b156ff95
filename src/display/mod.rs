//! Display formatting for terminal output
//!
//! Number and percentage formatting shared by every report, plus tables for
//! listing stored records.

pub mod report;
pub mod tables;

pub use report::{format_bar, format_percentage, format_trend, money, section, separator, truncate};
pub use tables::{
    format_ceiling_table, format_goal_table, format_recurring_table, format_transaction_table,
};
