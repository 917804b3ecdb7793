//! Application settings loaded from config.toml
//!
//! Every section and field has a default, so a missing section, or an empty
//! file, yields the stock behaviour.

use crate::core::insight::InsightThresholds;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// Default location of the exported backend payload.
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/snapshot.json";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Cut-offs for budget insights
    pub insights: InsightThresholds,
    /// Receipt list settings
    pub receipts: ReceiptSettings,
    /// Where the backend payload is read from
    pub snapshot: SnapshotSettings,
}

/// Receipt list settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReceiptSettings {
    /// Page size requested from the receipts endpoint
    pub fetch_limit: usize,
    /// Rows shown in the recent expenses list
    pub recent_limit: usize,
    /// Currency used for budget totals
    pub currency: String,
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        Self {
            fetch_limit: 100,
            recent_limit: 5,
            currency: "THB".to_string(),
        }
    }
}

/// Snapshot location
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    /// Path of the JSON payload
    pub path: PathBuf,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

/// Loads settings from a TOML file
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}
