//! Runtime configuration resolved from the process environment.
//!
//! | Variable           | Default                         |
//! |--------------------|---------------------------------|
//! | `MARKET_DB_PATH`   | `<temp_dir>/market.sqlite3`     |
//! | `MARKET_LOG_LEVEL` | [`default_log_level`]           |
//! | `MARKET_LOG_DIR`   | unset: file logging stays off   |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, init_logging, normalize_level};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "MARKET_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "MARKET_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "MARKET_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "market.sqlite3";

/// Resolved core settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl CoreConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    /// Returns a message when `MARKET_LOG_LEVEL` is not a known level.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`, which maps a variable name to
    /// its raw value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let db_path = non_blank(DB_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
        let log_level = match non_blank(LOG_LEVEL_ENV) {
            Some(level) => normalize_level(&level)?,
            None => default_log_level(),
        };
        let log_dir = non_blank(LOG_DIR_ENV).map(PathBuf::from);

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging stays off.
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log_dir is not valid UTF-8: `{}`", log_dir.display()))?;
        init_logging(self.log_level, log_dir)?;
        Ok(true)
    }
}
