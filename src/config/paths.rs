//! XDG-style locations for pathtag's config, data, and store files.

use crate::error::TagError;
use std::path::PathBuf;

const APP_DIR: &str = "pathtag";

/// The user's home directory.
pub fn home_dir() -> Result<PathBuf, TagError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| TagError::ConfigError("Could not determine home directory".to_string()))
}

/// `$XDG_CONFIG_HOME`, or `~/.config` when unset or relative.
pub fn config_home() -> Result<PathBuf, TagError> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// `$XDG_DATA_HOME`, or `~/.local/share` when unset or relative.
pub fn data_home() -> Result<PathBuf, TagError> {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

fn xdg_dir(var: &str, fallback: &str) -> Result<PathBuf, TagError> {
    match std::env::var_os(var).map(PathBuf::from) {
        Some(dir) if dir.is_absolute() => Ok(dir),
        _ => Ok(home_dir()?.join(fallback)),
    }
}

/// `<config home>/pathtag/config.toml`
pub fn global_config_path() -> Result<PathBuf, TagError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}

/// `<config home>/pathtag/tags.json`
pub fn default_store_path() -> Result<PathBuf, TagError> {
    Ok(config_home()?.join(APP_DIR).join("tags.json"))
}

/// `<data home>/pathtag/pathtag.log`
pub fn default_log_path() -> Result<PathBuf, TagError> {
    Ok(data_home()?.join(APP_DIR).join("pathtag.log"))
}
