//! Logging System
//!
//! Structured logging using the `tracing` crate. Stdout carries command output,
//! so diagnostics go to stderr unless configured otherwise.

use crate::error::TagError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Disable all logging when false
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path (if output is "file"); defaults to the data directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format only, stdout/stderr only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Output destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Stdout,
    Stderr,
    File,
}

/// Environment variables read by [`LoggingConfig::apply_env_overrides`].
pub const ENV_LOG: &str = "PATHTAG_LOG";
pub const ENV_LOG_FORMAT: &str = "PATHTAG_LOG_FORMAT";
pub const ENV_LOG_OUTPUT: &str = "PATHTAG_LOG_OUTPUT";
pub const ENV_LOG_MODULES: &str = "PATHTAG_LOG_MODULES";

impl LoggingConfig {
    /// Fold `PATHTAG_LOG*` variables into the config. Call before applying CLI flags.
    pub fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_with(|key| std::env::var(key).ok());
    }

    /// Same as [`LoggingConfig::apply_env_overrides`] with an injectable lookup.
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.level = level;
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            if format == "json" || format == "text" {
                self.format = format;
            }
        }
        if let Some(output) = lookup(ENV_LOG_OUTPUT) {
            if parse_output(&output).is_ok() {
                self.output = output;
            }
        }
        if let Some(modules) = lookup(ENV_LOG_MODULES) {
            for module_spec in modules.split(',') {
                if let Some((module, level)) = module_spec.split_once('=') {
                    self.modules
                        .insert(module.trim().to_string(), level.trim().to_string());
                }
            }
        }
    }
}

/// Initialize the logging system from a fully resolved config.
///
/// Priority order (highest to lowest), folded into the config by the binary:
/// 1. CLI arguments
/// 2. Environment variables (PATHTAG_LOG, PATHTAG_LOG_FORMAT, PATHTAG_LOG_OUTPUT)
/// 3. Configuration file
/// 4. Defaults
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), TagError> {
    let default_config = LoggingConfig::default();
    let config = config.unwrap_or(&default_config);
    if !config.enabled {
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let output = parse_output(&config.output)?;
    let use_color = config.color && output != Output::File;

    let writer = match output {
        Output::Stdout => BoxMakeWriter::new(std::io::stdout),
        Output::Stderr => BoxMakeWriter::new(std::io::stderr),
        Output::File => BoxMakeWriter::new(Mutex::new(open_log_file(config)?)),
    };

    let base_subscriber = Registry::default().with(filter);
    let result = if format == "json" {
        base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init()
    } else {
        base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_color)
                    .with_writer(writer),
            )
            .try_init()
    };

    result.map_err(|e| TagError::ConfigError(format!("Failed to initialize logging: {}", e)))
}

/// Resolve the log file: explicit CLI path, then config, then the data directory.
pub fn resolve_log_file_path(
    cli_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<PathBuf, TagError> {
    match cli_path.or(config_path) {
        Some(path) => Ok(path),
        None => crate::config::paths::default_log_path(),
    }
}

fn open_log_file(config: &LoggingConfig) -> Result<std::fs::File, TagError> {
    let log_file = resolve_log_file_path(None, config.file.clone())?;

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            TagError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .map_err(|e| {
            TagError::ConfigError(format!("Failed to open log file {:?}: {}", log_file, e))
        })
}

/// Build the filter from the level and per-module directives
fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter, TagError> {
    if config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| TagError::ConfigError(format!("Invalid log level: {}", e)))?;

    for (module, module_level) in &config.modules {
        let directive = format!("{}={}", module, module_level);
        filter = filter.add_directive(
            directive
                .parse()
                .map_err(|e| TagError::ConfigError(format!("Invalid log directive: {}", e)))?,
        );
    }

    Ok(filter)
}

/// Validate the configured output format
fn determine_format(config: &LoggingConfig) -> Result<String, TagError> {
    let format = config.format.as_str();
    if format != "json" && format != "text" {
        return Err(TagError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }

    Ok(format.to_string())
}

fn parse_output(output: &str) -> Result<Output, TagError> {
    match output {
        "stdout" => Ok(Output::Stdout),
        "stderr" => Ok(Output::Stderr),
        "file" => Ok(Output::File),
        _ => Err(TagError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}
