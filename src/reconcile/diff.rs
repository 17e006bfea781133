//! Set difference between desired and current tag membership

use crate::reconcile::parse::DesiredState;
use crate::store::TagStoreView;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single store mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Operation {
    #[serde(rename = "add")]
    Add { tag: String, path: PathBuf },
    #[serde(rename = "rm")]
    Remove { tag: String, path: PathBuf },
}

impl Operation {
    pub fn tag(&self) -> &str {
        match self {
            Operation::Add { tag, .. } | Operation::Remove { tag, .. } => tag,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Operation::Add { path, .. } | Operation::Remove { path, .. } => path,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add { tag, path } => write!(f, "add @{} {}", tag, path.display()),
            Operation::Remove { tag, path } => write!(f, "remove @{} {}", tag, path.display()),
        }
    }
}

/// Every tag the store knows plus every tag typed on the line, sorted with
/// adjacent duplicates collapsed.
pub fn candidate_universe<'a, I>(known: I, desired: &'a BTreeSet<String>) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut universe: Vec<&str> = known
        .into_iter()
        .chain(desired.iter())
        .map(String::as_str)
        .filter(|tag| !tag.is_empty())
        .collect();
    universe.sort_unstable();
    universe.dedup();
    universe
}

/// Operations that move `path` from its current tags to `desired`.
pub fn diff_path<S>(path: &Path, desired: &BTreeSet<String>, store: &S) -> Vec<Operation>
where
    S: TagStoreView + ?Sized,
{
    let mut operations = Vec::new();
    for tag in candidate_universe(store.all_tags().keys(), desired) {
        let should_have = desired.contains(tag);
        let has = store.contains(tag, path);
        if should_have && !has {
            operations.push(Operation::Add {
                tag: tag.to_string(),
                path: path.to_path_buf(),
            });
        } else if !should_have && has {
            operations.push(Operation::Remove {
                tag: tag.to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    operations
}

/// Operations for the whole desired state, against the store as it is now.
pub fn compute_operations<S>(desired: &DesiredState, store: &S) -> Vec<Operation>
where
    S: TagStoreView + ?Sized,
{
    desired
        .iter()
        .flat_map(|(path, tags)| diff_path(path, tags, store))
        .collect()
}
