//! Core TOML config loading: read from path or platform default.

use crate::schema::TestflowsConfig;
use crate::validation;
use std::path::Path;
use testflows_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};

/// Load config from a specific TOML file path.
///
/// Missing fields fall back to serde defaults. A validation failure is
/// logged and the parsed config is returned as-is.
pub fn load_from_path(path: &Path) -> Result<TestflowsConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: TestflowsConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On Linux: `~/.config/testflows/config.toml`
///
/// If the file does not exist, writes the commented template and returns defaults.
pub fn load_default() -> Result<TestflowsConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(TestflowsConfig::default())
        }
        Err(e) => Err(e),
    }
}
