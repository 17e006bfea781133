//! Filesystem walker that locates repository roots by their marker entries

use crate::discover::path::normalize_path;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Walker configuration, read from the `[discovery]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Entry names that mark their parent as a repository root
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
    /// Whether to follow symbolic links (default: false)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Maximum depth to traverse (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Directory names that are never descended into
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_markers() -> Vec<String> {
    vec![".git".to_string()]
}

fn default_ignore() -> Vec<String> {
    vec!["node_modules".to_string()]
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            markers: default_markers(),
            follow_symlinks: false,
            max_depth: None,
            ignore: default_ignore(),
        }
    }
}

impl WalkerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.markers.is_empty() {
            return Err("At least one discovery marker is required".to_string());
        }
        for marker in &self.markers {
            if marker.is_empty() || marker.contains('/') || marker.contains('\\') {
                return Err(format!("Invalid discovery marker: {:?}", marker));
            }
        }
        Ok(())
    }
}

/// Repository-root walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the tree and return the parent of every marker entry.
    ///
    /// Unreadable entries and symlink loops are skipped. The result is
    /// deduplicated and sorted by path bytes.
    pub fn find_marked(&self) -> Vec<PathBuf> {
        let mut found = Vec::new();

        let mut entries = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.should_ignore(entry));

        loop {
            let entry = match entries.next() {
                None => break,
                Some(Ok(entry)) => entry,
                Some(Err(e)) => {
                    debug!(error = %e, "Skipping unreadable entry during discovery");
                    continue;
                }
            };

            if entry.depth() == 0 || !self.is_marker(entry.file_name()) {
                continue;
            }

            if let Some(parent) = entry.path().parent() {
                found.push(normalize_path(parent));
            }
            if entry.file_type().is_dir() {
                entries.skip_current_dir();
            }
        }

        found.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        found.dedup();
        found
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_marker(&self, name: &OsStr) -> bool {
        self.config.markers.iter().any(|m| name == OsStr::new(m))
    }

    fn should_ignore(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && self
                .config
                .ignore
                .iter()
                .any(|pattern| entry.file_name() == OsStr::new(pattern))
    }
}
