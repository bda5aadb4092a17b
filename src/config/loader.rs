//! Configuration loader

use super::Config;
use crate::MetadataError;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Default configuration file location
pub const DEFAULT_CONFIG_PATH: &str = "/etc/bootmeta/config.yaml";

/// Load configuration from `path`, falling back to defaults if it does not exist
pub async fn load_config(path: impl AsRef<Path>) -> Result<Config, MetadataError> {
    let path = path.as_ref();

    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).await?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    let config = Config::from_yaml(&content).map_err(|e| {
        MetadataError::Config(format!("failed to parse {}: {}", path.display(), e))
    })?;

    debug!("Loaded config from {}", path.display());
    Ok(config)
}
