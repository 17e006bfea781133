//! CLI output: error and warning mapping to the selected output format.

use crate::cli::parse::OutputFormat;
use crate::error::TagError;
use owo_colors::OwoColorize;
use serde_json::json;

/// Map a fatal error to a string for CLI output.
pub fn map_error(e: &TagError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => e.to_string(),
        OutputFormat::Json => json!({ "error": e.kind(), "message": e.to_string() }).to_string(),
    }
}

/// Map a recoverable problem to a warning line.
pub fn map_warning(e: &TagError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => format!("{} {}", "warning:".yellow(), e),
        OutputFormat::Json => {
            let mut record = json!({ "warning": e.kind(), "message": e.to_string() });
            match e {
                TagError::PathNotFound(path) => {
                    record["path"] = json!(path);
                }
                TagError::MalformedLine { line_number, .. } => {
                    record["line"] = json!(line_number);
                }
                TagError::EditorExitedNonzero { code, .. } => {
                    record["code"] = json!(code);
                }
                _ => {}
            }
            record.to_string()
        }
    }
}
