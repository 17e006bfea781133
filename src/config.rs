//! Configuration System
//!
//! Layered configuration built with the `config` crate: built-in defaults, the
//! global `config.toml`, an optional explicit file, and `PATHTAG__*` environment
//! overrides. Tests included.

use crate::discover::path::expand_home;
use crate::discover::WalkerConfig;
use crate::error::TagError;
use crate::logging::LoggingConfig;
use crate::session::default_temp_path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod facade;
mod merge;
pub mod paths;
mod sources;

pub use facade::ConfigLoader;
pub use sources::env::ENV_PREFIX;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathTagConfig {
    /// Home prefix used for `~` abbreviation and as the default discovery root
    #[serde(default)]
    pub home: Option<PathBuf>,

    /// Tag store location
    #[serde(default)]
    pub store: StoreConfig,

    /// Repository discovery
    #[serde(default)]
    pub discovery: WalkerConfig,

    /// Editor session
    #[serde(default)]
    pub editor: EditorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tag store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store file path; `~` is expanded. Defaults to `<config home>/pathtag/tags.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Editor session configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editor command, overriding the GIT_EDITOR/VISUAL/EDITOR chain
    #[serde(default)]
    pub command: Option<String>,

    /// Staging file for the edit session. Defaults to a fixed name in the system temp dir.
    #[serde(default)]
    pub temp_file: Option<PathBuf>,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Home(String),
    Discovery(String),
    Editor(String),
    Store(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Home(msg) => write!(f, "Home: {}", msg),
            ValidationError::Discovery(msg) => write!(f, "Discovery: {}", msg),
            ValidationError::Editor(msg) => write!(f, "Editor: {}", msg),
            ValidationError::Store(msg) => write!(f, "Store: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PathTagConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(home) = &self.home {
            if !home.is_absolute() {
                errors.push(ValidationError::Home(format!(
                    "Home prefix must be an absolute path: {}",
                    home.display()
                )));
            }
        }

        if let Err(e) = self.discovery.validate() {
            errors.push(ValidationError::Discovery(e));
        }

        if let Some(command) = &self.editor.command {
            if command.trim().is_empty() {
                errors.push(ValidationError::Editor(
                    "Editor command cannot be empty".to_string(),
                ));
            }
        }

        if let Some(path) = &self.store.path {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::Store("Store path cannot be empty".to_string()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all problems into one error.
    pub fn ensure_valid(&self) -> Result<(), TagError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            TagError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })
    }

    /// Home prefix: the configured one, or the user's home directory.
    pub fn resolve_home(&self) -> Result<PathBuf, TagError> {
        match &self.home {
            Some(home) => Ok(home.clone()),
            None => paths::home_dir(),
        }
    }

    /// Store file path with `~` expanded against `home`.
    pub fn resolve_store_path(&self, home: &Path) -> Result<PathBuf, TagError> {
        match &self.store.path {
            Some(path) => Ok(expand_home(&path.to_string_lossy(), home)),
            None => paths::default_store_path(),
        }
    }

    /// Staging file for the edit session.
    pub fn resolve_temp_file(&self, home: &Path) -> PathBuf {
        match &self.editor.temp_file {
            Some(path) => expand_home(&path.to_string_lossy(), home),
            None => default_temp_path(),
        }
    }
}
