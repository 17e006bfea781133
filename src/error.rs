//! Error types for the pathtag tagging system.

use std::path::PathBuf;
use thiserror::Error;

/// Tag store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTag(String),

    #[error("Failed to serialize tag store: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to write tag store {path:?}: {reason}")]
    WriteFailure { path: PathBuf, reason: String },

    #[error("Store I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Application-level errors surfaced by the commands and the reconciliation pipeline.
///
/// `PathNotFound`, `EditorExitedNonzero` and `MalformedLine` are recoverable: they are
/// collected as warnings and reported next to the command output. Everything else
/// terminates the current command.
#[derive(Debug, Error)]
pub enum TagError {
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("Editor \"{editor}\" exited with nonzero exit code: {code}")]
    EditorExitedNonzero { editor: String, code: i32 },

    #[error("Skipping line {line_number} ({reason}): {line}")]
    MalformedLine {
        line_number: usize,
        line: String,
        reason: String,
    },

    #[error("Failed to persist tags: {0}")]
    StoreWriteFailure(String),

    #[error("Failed to launch editor \"{editor}\": {reason}")]
    EditorSpawn { editor: String, reason: String },

    #[error("Failed to access temp file {}: {reason}", .path.display())]
    TempFile { path: PathBuf, reason: String },

    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl TagError {
    /// Stable identifier used in machine-readable output.
    pub fn kind(&self) -> &'static str {
        match self {
            TagError::PathNotFound(_) => "path_not_found",
            TagError::EditorExitedNonzero { .. } => "editor_exited_nonzero",
            TagError::MalformedLine { .. } => "malformed_line",
            TagError::StoreWriteFailure(_) => "store_write_failure",
            TagError::EditorSpawn { .. } => "editor_spawn",
            TagError::TempFile { .. } => "temp_file",
            TagError::InvalidTag(_) => "invalid_tag",
            TagError::ConfigError(_) => "config_error",
            TagError::Store(StoreError::InvalidTag(_)) => "invalid_tag",
            TagError::Store(_) => "store_error",
        }
    }

    /// Whether the error only degrades the current batch instead of aborting it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            TagError::PathNotFound(_)
                | TagError::EditorExitedNonzero { .. }
                | TagError::MalformedLine { .. }
        )
    }
}

impl From<config::ConfigError> for TagError {
    fn from(err: config::ConfigError) -> Self {
        TagError::ConfigError(err.to_string())
    }
}
