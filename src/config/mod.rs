//! Configuration module for PocketLens
//!
//! - Path resolution for the settings file and record snapshots
//! - User settings persistence, including analytics thresholds

pub mod paths;
pub mod settings;

pub use paths::PocketPaths;
pub use settings::{PlanShare, Settings, Thresholds};
