//! # Application Configuration
//!
//! Loaded once at startup from environment variables with fallback to
//! platform defaults.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`GARDEN_*`, then `RUST_LOG` for the filter)
//! 2. Platform data directory (`directories::BaseDirs`)
//!
//! ## Default Locations
//! ```text
//! <data dir>/GardenProductManager/garden_db.sqlite
//! <data dir>/GardenProductManager/logs/app.log
//!
//! <data dir> = %APPDATA%                        (Windows)
//!            = ~/Library/Application Support    (macOS)
//!            = ~/.local/share                   (Linux)
//! ```

use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Folder created under the platform data directory.
pub const APP_DIR_NAME: &str = "GardenProductManager";

/// Store file name.
pub const DATABASE_FILE_NAME: &str = "garden_db.sqlite";

/// Log file name inside the log directory.
pub const LOG_FILE_NAME: &str = "app.log";

/// Filter used when neither `GARDEN_LOG` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "info,garden=debug,sqlx=warn";

/// Application configuration. Read-only after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Path to the SQLite store.
    pub database_path: PathBuf,

    /// Directory holding `app.log`.
    pub log_dir: PathBuf,

    /// `tracing_subscriber::EnvFilter` directive string.
    pub log_filter: String,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `GARDEN_DB_PATH`: Override the store file path
    /// - `GARDEN_LOG_DIR`: Override the log directory
    /// - `GARDEN_LOG`: Tracing filter (falls back to `RUST_LOG`)
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = BaseDirs::new().map(|dirs| dirs.data_dir().join(APP_DIR_NAME));
        Self::load(|key| std::env::var(key).ok(), data_dir)
    }

    /// Builds the configuration from a variable lookup and the app data
    /// directory (`None` when the platform has no home directory).
    pub fn load<F>(lookup: F, data_dir: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match lookup("GARDEN_DB_PATH") {
            Some(path) => non_empty_path("GARDEN_DB_PATH", path)?,
            None => data_dir
                .as_ref()
                .ok_or(ConfigError::NoDataDirectory)?
                .join(DATABASE_FILE_NAME),
        };

        let log_dir = match lookup("GARDEN_LOG_DIR") {
            Some(path) => non_empty_path("GARDEN_LOG_DIR", path)?,
            None => data_dir
                .as_ref()
                .ok_or(ConfigError::NoDataDirectory)?
                .join("logs"),
        };

        let log_filter = lookup("GARDEN_LOG")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        EnvFilter::try_new(&log_filter).map_err(|e| ConfigError::InvalidValue {
            name: "GARDEN_LOG".to_string(),
            reason: e.to_string(),
        })?;

        Ok(AppConfig {
            database_path,
            log_dir,
            log_filter,
        })
    }

    /// Configuration for an in-memory store (tests, diagnostics).
    pub fn in_memory(log_dir: impl Into<PathBuf>) -> Self {
        AppConfig {
            database_path: PathBuf::from(":memory:"),
            log_dir: log_dir.into(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Full path of the log file.
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}

fn non_empty_path(name: &str, value: String) -> Result<PathBuf, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(PathBuf::from(value))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine app data directory")]
    NoDataDirectory,

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_under_data_dir() {
        let data = PathBuf::from("/data/GardenProductManager");
        let config = AppConfig::load(lookup(&[]), Some(data.clone())).unwrap();

        assert_eq!(config.database_path, data.join("garden_db.sqlite"));
        assert_eq!(config.log_file(), data.join("logs").join("app.log"));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_env_overrides() {
        let vars = lookup(&[
            ("GARDEN_DB_PATH", "/tmp/garden.sqlite"),
            ("GARDEN_LOG_DIR", "/tmp/logs"),
            ("RUST_LOG", "warn"),
        ]);
        let config = AppConfig::load(vars, None).unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/garden.sqlite"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_garden_log_wins_over_rust_log() {
        let vars = lookup(&[("GARDEN_LOG", "debug"), ("RUST_LOG", "warn")]);
        let config = AppConfig::load(vars, Some(PathBuf::from("/data"))).unwrap();
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_missing_data_dir() {
        let err = AppConfig::load(lookup(&[]), None).unwrap_err();
        assert!(matches!(err, ConfigError::NoDataDirectory));
    }

    #[test]
    fn test_empty_path_rejected() {
        let err = AppConfig::load(lookup(&[("GARDEN_DB_PATH", " ")]), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref name, .. } if name == "GARDEN_DB_PATH"));
    }

    #[test]
    fn test_bad_filter_rejected() {
        let vars = lookup(&[("GARDEN_LOG", "garden=notalevel")]);
        let err = AppConfig::load(vars, Some(PathBuf::from("/data"))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
