mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, DisplayConfig, MetricsConfig, StorageConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/sleepdiary[-dev]/` based on SLEEPDIARY_ENV.
///
/// Set SLEEPDIARY_ENV=dev to use development data directory.
/// SLEEPDIARY_DATA_DIR, when set, replaces the directory entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SLEEPDIARY_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("SLEEPDIARY_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("sleepdiary-dev")
            } else {
                base_dir.join("sleepdiary")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(ConfigError::DataDir)?;
    Ok(dir)
}
