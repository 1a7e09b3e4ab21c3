//! JSON persistence of [`IssConfig`].

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, Validate};
use crate::iss::IssConfig;

/// Default config file: `<config_dir>/finec/config.json`.
pub fn default_config_path() -> ConfigResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("finec").join("config.json"))
}

/// Reads a config file. A missing file yields the defaults.
pub fn load_from(path: &Path) -> ConfigResult<IssConfig> {
    if !path.exists() {
        log::debug!("{} not found, using defaults", path.display());
        return Ok(IssConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: IssConfig = serde_json::from_str(&content)?;
    config.validate_or_error()?;
    Ok(config)
}

/// Writes a config file, creating parent directories.
pub fn save_to(config: &IssConfig, path: &Path) -> ConfigResult<()> {
    config.validate_or_error()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

/// Loads the effective configuration: the file at `path` (or the default
/// location), then environment overrides.
pub fn load_effective(path: Option<&Path>) -> ConfigResult<IssConfig> {
    let mut config = match path {
        Some(p) => load_from(p)?,
        None => load_from(&default_config_path()?)?,
    };
    config.apply_env_overrides()?;
    Ok(config)
}
