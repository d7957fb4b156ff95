//! PocketLens - personal finance analytics from the command line
//!
//! This library turns a record of income and expense transactions into
//! reports: category totals and trends, unusual expenses, budget status,
//! spending patterns, month-over-month insights and a recommended spending
//! plan. The analytics are pure functions over transaction snapshots; the
//! records themselves live in local JSON files.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, thresholds and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, budgets, recurring expenses, goals)
//! - `storage`: JSON file storage layer
//! - `services`: Analytics engine and record services
//! - `reports`: Report assembly on top of the analytics
//! - `export`: JSON, YAML and CSV rendering
//! - `display`: Terminal formatting helpers
//! - `cli`: Command handlers for the `pocketlens` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use pocketlens::config::{PocketPaths, Settings};
//! use pocketlens::reports::InsightsReport;
//! use pocketlens::services::PeriodResolver;
//! use pocketlens::storage::Storage;
//!
//! let paths = PocketPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! let resolver = PeriodResolver::today_local();
//! let report = InsightsReport::generate(&storage, &resolver, settings.default_period, &settings)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{PocketError, PocketResult};
