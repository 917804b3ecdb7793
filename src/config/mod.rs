/// Environment variable lookups (`.env` aware)
pub mod environment;

/// Settings loading from config.toml
pub mod settings;

pub use settings::{AppConfig, load_config};

use crate::errors::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads the application configuration.
///
/// Reads the file named by `RECEIPT_BUDDY_CONFIG` (default `config.toml`). A
/// missing default file is not an error and yields the defaults; an explicitly
/// named file must exist. `RECEIPT_BUDDY_SNAPSHOT` then overrides the snapshot
/// path.
///
/// # Errors
/// Returns `Error::Config` when the file cannot be read or parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let explicit = environment::optional_var(environment::CONFIG_VAR);
    let path = explicit
        .as_deref()
        .map_or_else(|| PathBuf::from(settings::DEFAULT_CONFIG_PATH), PathBuf::from);

    let mut config = if explicit.is_none() && !Path::new(&path).exists() {
        info!(
            "No {} found, using default settings.",
            settings::DEFAULT_CONFIG_PATH
        );
        AppConfig::default()
    } else {
        load_config(&path)?
    };

    if let Some(snapshot) = environment::optional_var(environment::SNAPSHOT_VAR) {
        info!("Snapshot path overridden by {}", environment::SNAPSHOT_VAR);
        config.snapshot.path = PathBuf::from(snapshot);
    }

    Ok(config)
}
