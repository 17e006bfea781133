//! Edit session
//!
//! Writes the rendered snapshot to a staging file, runs the user's editor on it
//! with inherited standard streams, and blocks until the editor exits. Whatever
//! is in the file afterwards is returned, even when the editor reports failure.

pub mod editor;

pub use editor::{resolve_editor, EditorCommand};

use crate::error::TagError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{info, warn};

/// File name of the staging file under the system temp directory.
pub const TEMP_FILE_NAME: &str = "pathtag-repos-tmp.txt";

/// Default staging file path.
pub fn default_temp_path() -> PathBuf {
    std::env::temp_dir().join(TEMP_FILE_NAME)
}

/// Result of one edit session.
#[derive(Debug)]
pub struct EditOutcome {
    /// File content after the editor exited
    pub content: String,
    /// Exit code of the editor, if it exited normally
    pub exit_code: Option<i32>,
    /// Set when the editor did not exit successfully
    pub warning: Option<TagError>,
}

/// Something that lets the user edit a document and hands back the result.
pub trait DocumentEditor {
    fn edit(&self, document: &str) -> Result<EditOutcome, TagError>;
}

/// A single blocking edit of a document in an external editor.
#[derive(Debug, Clone)]
pub struct EditSession {
    editor: EditorCommand,
    temp_path: PathBuf,
}

impl EditSession {
    pub fn new(editor: EditorCommand) -> Self {
        Self {
            editor,
            temp_path: default_temp_path(),
        }
    }

    pub fn with_temp_path(mut self, temp_path: impl Into<PathBuf>) -> Self {
        self.temp_path = temp_path.into();
        self
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Run the editor on `document` and return the edited content.
    ///
    /// Failing to stage the file or to start the editor is fatal. A nonzero exit
    /// is only a warning; the file is still read back.
    pub fn run(&self, document: &str) -> Result<EditOutcome, TagError> {
        fs::write(&self.temp_path, document).map_err(|e| TagError::TempFile {
            path: self.temp_path.clone(),
            reason: e.to_string(),
        })?;

        info!(
            editor = %self.editor.display(),
            file = %self.temp_path.display(),
            "Launching editor"
        );
        let status = Command::new(&self.editor.program)
            .args(&self.editor.args)
            .arg(&self.temp_path)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| TagError::EditorSpawn {
                editor: self.editor.display(),
                reason: e.to_string(),
            })?;

        let warning = if status.success() {
            None
        } else {
            // Killed by a signal has no exit code.
            let code = status.code().unwrap_or(-1);
            warn!(editor = %self.editor.display(), code, "Editor exited with nonzero status");
            Some(TagError::EditorExitedNonzero {
                editor: self.editor.display(),
                code,
            })
        };

        let content = fs::read_to_string(&self.temp_path).map_err(|e| TagError::TempFile {
            path: self.temp_path.clone(),
            reason: e.to_string(),
        })?;

        Ok(EditOutcome {
            content,
            exit_code: status.code(),
            warning,
        })
    }
}

impl DocumentEditor for EditSession {
    fn edit(&self, document: &str) -> Result<EditOutcome, TagError> {
        self.run(document)
    }
}
