//! Tag Store
//!
//! The persistent mapping from tag name to the ordered set of directories carrying
//! that tag. The reconciliation pipeline only talks to the [`TagStoreView`] and
//! [`TagStore`] traits, so it runs the same against the JSON file store and the
//! in-memory store used in tests.

pub mod persistence;

pub use persistence::JsonTagStore;

use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Tag name to ordered path set.
pub type TagMap = BTreeMap<String, Vec<PathBuf>>;

/// Result of a tag query, resolved once at the store boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagQueryResult {
    /// Paths carrying a single requested tag.
    SinglePathList(Vec<PathBuf>),
    /// Every defined tag with its paths.
    AllTagsMap(TagMap),
    /// Nothing matched.
    Empty,
}

/// Read side of the tag store.
pub trait TagStoreView {
    /// Snapshot of all tags, in natural key order.
    fn all_tags(&self) -> &TagMap;

    /// Paths tagged with `tag`, in insertion order.
    fn get(&self, tag: &str) -> &[PathBuf] {
        self.all_tags()
            .get(tag)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn contains(&self, tag: &str, path: &Path) -> bool {
        self.get(tag).iter().any(|p| p == path)
    }

    /// Tags attached to `path`, in natural key order.
    fn tags_for_path(&self, path: &Path) -> BTreeSet<String> {
        self.all_tags()
            .iter()
            .filter(|(_, paths)| paths.iter().any(|p| p == path))
            .map(|(tag, _)| tag.clone())
            .collect()
    }

    /// Resolve a `list` query: a single tag when given, otherwise the whole map.
    fn query(&self, tag: Option<&str>) -> TagQueryResult {
        match tag {
            Some(tag) => {
                let paths = self.get(tag);
                if paths.is_empty() {
                    TagQueryResult::Empty
                } else {
                    TagQueryResult::SinglePathList(paths.to_vec())
                }
            }
            None => {
                let all = self.all_tags();
                if all.is_empty() {
                    TagQueryResult::Empty
                } else {
                    TagQueryResult::AllTagsMap(all.clone())
                }
            }
        }
    }
}

/// Write side of the tag store. Mutations are staged in memory until `save`.
pub trait TagStore: TagStoreView {
    /// Attach `tag` to `path`. Returns false when the pair already existed.
    fn add(&mut self, tag: &str, path: &Path) -> Result<bool, StoreError>;

    /// Detach `tag` from `path`. Returns false when the pair did not exist.
    fn remove(&mut self, tag: &str, path: &Path) -> bool;

    /// Persist all staged mutations.
    fn save(&mut self) -> Result<(), StoreError>;
}

/// Validate a tag name: non-empty, free of whitespace and backslashes.
///
/// Tags are written unescaped in the snapshot, so a backslash would escape the
/// separator before the next tag on the same line.
pub fn validate_tag(tag: &str) -> Result<(), StoreError> {
    if tag.is_empty() || tag.chars().any(|c| c.is_whitespace() || c == '\\') {
        return Err(StoreError::InvalidTag(tag.to_string()));
    }
    Ok(())
}

/// In-memory tag membership shared by every store implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagIndex {
    #[serde(default)]
    pub tags: TagMap,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, tag: &str, path: &Path) -> Result<bool, StoreError> {
        validate_tag(tag)?;
        let paths = self.tags.entry(tag.to_string()).or_default();
        if paths.iter().any(|p| p == path) {
            return Ok(false);
        }
        paths.push(path.to_path_buf());
        Ok(true)
    }

    /// Removing the last path of a tag drops the tag itself.
    pub fn remove(&mut self, tag: &str, path: &Path) -> bool {
        let Some(paths) = self.tags.get_mut(tag) else {
            return false;
        };
        let before = paths.len();
        paths.retain(|p| p != path);
        let removed = paths.len() != before;
        if paths.is_empty() {
            self.tags.remove(tag);
        }
        removed
    }
}

/// Store with no backing file. `save` only counts commits.
#[derive(Debug, Clone, Default)]
pub struct MemoryTagStore {
    index: TagIndex,
    saves: usize,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_index(index: TagIndex) -> Self {
        Self { index, saves: 0 }
    }

    /// Build a store from `(tag, paths)` pairs.
    pub fn with_tags<I, T, P>(entries: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (T, Vec<P>)>,
        T: AsRef<str>,
        P: AsRef<Path>,
    {
        let mut index = TagIndex::new();
        for (tag, paths) in entries {
            for path in paths {
                index.add(tag.as_ref(), path.as_ref())?;
            }
        }
        Ok(Self::from_index(index))
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn index(&self) -> &TagIndex {
        &self.index
    }
}

impl TagStoreView for MemoryTagStore {
    fn all_tags(&self) -> &TagMap {
        &self.index.tags
    }
}

impl TagStore for MemoryTagStore {
    fn add(&mut self, tag: &str, path: &Path) -> Result<bool, StoreError> {
        self.index.add(tag, path)
    }

    fn remove(&mut self, tag: &str, path: &Path) -> bool {
        self.index.remove(tag, path)
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.saves += 1;
        Ok(())
    }
}
