//! Configuration loading from `~/.factbot/config.toml` with defaults.

use factbot_types::config::{FactbotConfig, HOME_DIR_NAME};
use factbot_types::error::{FactbotError, FactbotResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Load configuration from `path` (or the default path), falling back to
/// defaults on any problem. Never fails: a broken config file is logged and
/// ignored.
pub fn load_config(path: Option<&Path>) -> FactbotConfig {
    let config_path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path);

    if !config_path.exists() {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        return FactbotConfig::default();
    }

    match read_config(&config_path) {
        Ok(config) => {
            info!(path = %config_path.display(), "Loaded configuration");
            config
        }
        Err(e) => {
            warn!(
                error = %e,
                path = %config_path.display(),
                "Failed to load config, using defaults"
            );
            FactbotConfig::default()
        }
    }
}

fn read_config(config_path: &Path) -> Result<FactbotConfig, String> {
    let contents = std::fs::read_to_string(config_path).map_err(|e| format!("read: {e}"))?;
    toml::from_str(&contents).map_err(|e| format!("parse: {e}"))
}

/// Get the default factbot home directory.
pub fn factbot_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(HOME_DIR_NAME)
}

/// Get the default config file path.
pub fn default_config_path() -> PathBuf {
    factbot_home().join("config.toml")
}

/// Write `config` to `path` as TOML, creating parent directories. An
/// existing file is left untouched; returns whether a file was written.
pub fn write_default_config(path: &Path, config: &FactbotConfig) -> FactbotResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let body = toml::to_string_pretty(config)
        .map_err(|e| FactbotError::Serialization(e.to_string()))?;
    std::fs::write(path, body)?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(true)
}
