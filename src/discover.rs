//! Directory discovery
//!
//! Finds repository roots under a directory and projects the tag store onto them.
//! Discovery is best effort: unreadable subtrees are skipped and a missing root
//! produces an empty result with a `PathNotFound` warning.

pub mod path;
pub mod walker;

pub use walker::{Walker, WalkerConfig};

use crate::error::TagError;
use crate::store::TagStoreView;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A discovered repository root with its current tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredDirectory {
    pub path: PathBuf,
    pub tags: BTreeSet<String>,
}

/// Outcome of a discovery run.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Repository roots, sorted and deduplicated
    pub directories: Vec<PathBuf>,
    /// Recoverable problems encountered while walking
    pub warnings: Vec<TagError>,
}

/// Discover repository roots under `root`.
pub fn discover(root: &Path, config: &WalkerConfig) -> Discovery {
    let canonical_root = match path::canonicalize_path(root) {
        Ok(canonical) => canonical,
        Err(err) => {
            warn!(root = %root.display(), "Discovery root does not exist");
            return Discovery {
                directories: Vec::new(),
                warnings: vec![err],
            };
        }
    };

    info!(root = %canonical_root.display(), markers = ?config.markers, "Discovering repositories");
    let directories = Walker::with_config(canonical_root, config.clone()).find_marked();
    info!(count = directories.len(), "Discovery finished");

    Discovery {
        directories,
        warnings: Vec::new(),
    }
}

/// Pair each directory with the tags the store currently assigns to it.
pub fn attach_tags<S>(directories: &[PathBuf], store: &S) -> Vec<DiscoveredDirectory>
where
    S: TagStoreView + ?Sized,
{
    directories
        .iter()
        .map(|path| DiscoveredDirectory {
            path: path.clone(),
            tags: store.tags_for_path(path),
        })
        .collect()
}
