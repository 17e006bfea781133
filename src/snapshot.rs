//! Snapshot rendering
//!
//! Produces the editable document handed to the user's editor: a fixed comment
//! header followed by one line per directory, with tags aligned in a single
//! column. Rendering is pure, so re-rendering the same store state yields the
//! same bytes and an unedited document reconciles to nothing.

use crate::discover::path::display_path;
use crate::discover::DiscoveredDirectory;
use crate::tokenizer::escape_path;
use std::path::{Path, PathBuf};

/// Instructional header prepended to every snapshot.
pub const DEFAULT_HEADER: &str = include_str!("../templates/discover.template.md");

/// Gap between the widest path and the tag column.
const COLUMN_GAP: usize = 2;

/// Renders discovered directories into the editable snapshot format.
#[derive(Debug, Clone)]
pub struct SnapshotRenderer {
    home: PathBuf,
    header: String,
}

impl SnapshotRenderer {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            header: DEFAULT_HEADER.to_string(),
        }
    }

    /// Replace the instructional header. Every line of it must be blank or start with `#`.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Render the full document: header, then one line per directory in input order.
    pub fn render(&self, directories: &[DiscoveredDirectory]) -> String {
        let mut document = self.header.clone();
        if !document.is_empty() && !document.ends_with('\n') {
            document.push('\n');
        }
        for line in self.render_lines(directories) {
            document.push_str(&line);
            document.push('\n');
        }
        document
    }

    /// Render the data lines only.
    pub fn render_lines(&self, directories: &[DiscoveredDirectory]) -> Vec<String> {
        let shown: Vec<String> = directories
            .iter()
            .map(|dir| escape_path(&display_path(&dir.path, &self.home)))
            .collect();
        let column = shown
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            + COLUMN_GAP;

        directories
            .iter()
            .zip(shown)
            .map(|(dir, path)| {
                if dir.tags.is_empty() {
                    return path;
                }
                let tags: Vec<String> = dir.tags.iter().map(|t| format!("@{}", t)).collect();
                let padding = column - path.chars().count();
                format!("{}{}{}", path, " ".repeat(padding), tags.join(" "))
            })
            .collect()
    }
}
