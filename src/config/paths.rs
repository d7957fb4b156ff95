//! Path management for PocketLens
//!
//! ## Path Resolution Order
//!
//! 1. `POCKETLENS_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/pocketlens` on Linux,
//!    `~/Library/Application Support/pocketlens` on macOS,
//!    `%APPDATA%\pocketlens` on Windows)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::PocketError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "POCKETLENS_DATA_DIR";

/// Manages all paths used by PocketLens
#[derive(Debug, Clone)]
pub struct PocketPaths {
    base_dir: PathBuf,
}

impl PocketPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PocketError> {
        let base_dir = match std::env::var_os(DATA_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => BaseDirs::new()
                .map(|dirs| dirs.config_dir().join("pocketlens"))
                .ok_or_else(|| {
                    PocketError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use an explicit base directory (tests, `--data-dir`)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Directory holding the record snapshots
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn category_limits_file(&self) -> PathBuf {
        self.data_dir().join("category_limits.json")
    }

    pub fn recurring_file(&self) -> PathBuf {
        self.data_dir().join("recurring.json")
    }

    pub fn goals_file(&self) -> PathBuf {
        self.data_dir().join("goals.json")
    }

    /// Create the base and data directories if missing
    pub fn ensure_directories(&self) -> Result<(), PocketError> {
        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            PocketError::Io(format!(
                "Failed to create data directory {}: {}",
                self.data_dir().display(),
                e
            ))
        })
    }

    /// Whether `init` has been run (settings file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
