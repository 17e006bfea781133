//! JSON file persistence for the tag store

use crate::error::StoreError;
use crate::store::{TagIndex, TagMap, TagStore, TagStoreView};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// On-disk document. Keys other than `tags` belong to whoever else shares the
/// file and are written back untouched.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(flatten)]
    index: TagIndex,
    #[serde(flatten)]
    other: BTreeMap<String, serde_json::Value>,
}

/// Tag store backed by a JSON file of the form `{"tags": {"work": ["/a", "/b"]}}`.
pub struct JsonTagStore {
    path: PathBuf,
    document: StoreDocument,
}

impl JsonTagStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!(store = %path.display(), "Tag store file not found, starting empty");
            return Ok(Self {
                path,
                document: StoreDocument::default(),
            });
        }

        let bytes = fs::read(&path).map_err(|e| {
            StoreError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to read tag store {:?}: {}", path, e),
            ))
        })?;
        let document: StoreDocument = if bytes.iter().all(u8::is_ascii_whitespace) {
            StoreDocument::default()
        } else {
            serde_json::from_slice(&bytes)?
        };

        debug!(
            store = %path.display(),
            tags = document.index.tags.len(),
            "Loaded tag store"
        );
        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store atomically (temporary file + rename).
    fn save_to_disk(&self) -> Result<(), StoreError> {
        let write_failure = |reason: String| StoreError::WriteFailure {
            path: self.path.clone(),
            reason,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                write_failure(format!("Failed to create parent directory {:?}: {}", parent, e))
            })?;
        }

        let mut serialized = serde_json::to_vec_pretty(&self.document)?;
        serialized.push(b'\n');

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &serialized)
            .map_err(|e| write_failure(format!("Failed to write {:?}: {}", temp_path, e)))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_failure(format!("Failed to rename temp file: {}", e))
        })?;

        Ok(())
    }
}

impl TagStoreView for JsonTagStore {
    fn all_tags(&self) -> &TagMap {
        &self.document.index.tags
    }
}

impl TagStore for JsonTagStore {
    fn add(&mut self, tag: &str, path: &Path) -> Result<bool, StoreError> {
        self.document.index.add(tag, path)
    }

    fn remove(&mut self, tag: &str, path: &Path) -> bool {
        self.document.index.remove(tag, path)
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.save_to_disk()?;
        info!(
            store = %self.path.display(),
            tags = self.document.index.tags.len(),
            "Saved tag store"
        );
        Ok(())
    }
}
