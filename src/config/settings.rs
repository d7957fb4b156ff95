//! User settings for PocketLens
//!
//! Display preferences plus every tunable threshold the analytics use. All
//! fields carry serde defaults so a partial or older `config.json` still
//! loads, and the defaults reproduce the stock behaviour exactly.

use serde::{Deserialize, Serialize};

use super::paths::PocketPaths;
use crate::error::PocketError;
use crate::models::PeriodToken;

/// Thresholds for the analytics engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// A transaction is an outlier above `mean + outlier_sigma * stddev`
    pub outlier_sigma: f64,
    /// Maximum number of outliers reported
    pub outlier_limit: usize,
    /// Percentage of a ceiling at which a category is "approaching"
    pub approaching_percent: f64,
    /// This month over last month ratio that counts as overspending
    pub overspend_ratio: f64,
    /// Average spend per transaction a category needs for a savings tip
    pub savings_min_average: f64,
    /// Assumed reduction for savings tips (0.20 = 20%)
    pub savings_reduction: f64,
    /// Multiplier applied to the period total when projecting savings
    pub savings_annualization: f64,
    /// Max days between two identical charges flagged as a duplicate
    pub duplicate_window_days: i64,
    /// Max-over-mean ratio that flags unusually high spend in a category
    pub high_spend_multiplier: f64,
    /// Share of total spend above which a category is flagged
    pub category_share_percent: f64,
    /// Month-over-month category change worth mentioning
    pub category_change_percent: f64,
    /// Month-over-month total change worth mentioning
    pub total_change_percent: f64,
    /// Cap on month-over-month insights
    pub max_insights: usize,
    /// Food share of total spend that triggers a food tip
    pub food_share_percent: f64,
    pub food_reduction: f64,
    /// Leisure share of total spend that triggers a leisure tip
    pub leisure_share_percent: f64,
    pub leisure_reduction: f64,
    /// Transport total that triggers a transport tip
    pub transport_min_total: f64,
    pub transport_reduction: f64,
    /// Share of spend suggested for an emergency fund
    pub emergency_fund_rate: f64,
    /// Saving assumed from setting per-category budgets
    pub category_budget_rate: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            outlier_sigma: 1.5,
            outlier_limit: 10,
            approaching_percent: 80.0,
            overspend_ratio: 1.2,
            savings_min_average: 100.0,
            savings_reduction: 0.20,
            savings_annualization: 12.0,
            duplicate_window_days: 3,
            high_spend_multiplier: 2.0,
            category_share_percent: 30.0,
            category_change_percent: 15.0,
            total_change_percent: 10.0,
            max_insights: 3,
            food_share_percent: 25.0,
            food_reduction: 0.10,
            leisure_share_percent: 15.0,
            leisure_reduction: 0.15,
            transport_min_total: 100.0,
            transport_reduction: 0.10,
            emergency_fund_rate: 0.12,
            category_budget_rate: 0.10,
        }
    }
}

/// Recommended share of income for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanShare {
    pub category: String,
    /// Fraction of income, e.g. 0.25
    pub share: f64,
}

impl PlanShare {
    fn new(category: &str, share: f64) -> Self {
        Self {
            category: category.to_string(),
            share,
        }
    }
}

fn default_plan() -> Vec<PlanShare> {
    vec![
        PlanShare::new("Food", 0.25),
        PlanShare::new("Transport", 0.15),
        PlanShare::new("Housing", 0.30),
        PlanShare::new("Health", 0.05),
        PlanShare::new("Education", 0.05),
        PlanShare::new("Leisure", 0.10),
        PlanShare::new("Other", 0.10),
    ]
}

/// User settings for PocketLens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Period used when a report is run without `--period`
    #[serde(default)]
    pub default_period: PeriodToken,

    /// Log filter used when neither `POCKETLENS_LOG` nor `--verbose` is given
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub thresholds: Thresholds,

    /// Recommended income split for the spending plan
    #[serde(default = "default_plan")]
    pub plan: Vec<PlanShare>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            default_period: PeriodToken::default(),
            log_level: default_log_level(),
            thresholds: Thresholds::default(),
            plan: default_plan(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if there is no file
    pub fn load_or_create(paths: &PocketPaths) -> Result<Self, PocketError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller decides to
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PocketError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| PocketError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PocketPaths) -> Result<(), PocketError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PocketError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PocketError::Io(format!("Failed to write settings file: {}", e)))
    }
}
