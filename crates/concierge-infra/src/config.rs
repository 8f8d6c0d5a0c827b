//! Configuration loader for the concierge.
//!
//! Reads `config.toml` from the data directory (`~/.concierge/` in production)
//! and deserializes it into [`ConciergeConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::Path;

use concierge_types::config::ConciergeConfig;
use concierge_types::error::ConfigError;

use crate::paths::config_path;

/// Read and parse a config file, failing on any I/O or TOML error.
pub async fn read_config(path: &Path) -> Result<ConciergeConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read(format!("{}: {e}", path.display())))?;

    toml::from_str::<ConciergeConfig>(&content)
        .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`ConciergeConfig::default()`].
/// - Unreadable or malformed file: logs a warning, returns the default.
pub async fn load_config(data_dir: &Path) -> ConciergeConfig {
    let path = config_path(data_dir);

    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
        tracing::debug!("No config.toml found at {}, using defaults", path.display());
        return ConciergeConfig::default();
    }

    match read_config(&path).await {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ConciergeConfig::default()
        }
    }
}
