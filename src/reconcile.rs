//! Reconciliation engine
//!
//! Turns an edited snapshot into the minimal list of add/remove operations and
//! applies them. The whole desired state is computed against the store before
//! the first mutation, and the store is saved exactly once at the end.

pub mod diff;
pub mod parse;

pub use diff::{candidate_universe, compute_operations, diff_path, Operation};
pub use parse::{parse_document, DesiredState, ParsedDocument};

use crate::error::TagError;
use crate::store::{TagStore, TagStoreView};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Operations derived from a document, before anything is applied.
#[derive(Debug, Default)]
pub struct ReconcilePlan {
    pub operations: Vec<Operation>,
    /// Lines that were skipped
    pub warnings: Vec<TagError>,
}

/// Parses edited snapshots and reconciles a tag store with them.
#[derive(Debug, Clone)]
pub struct ReconciliationEngine {
    home: PathBuf,
}

impl ReconciliationEngine {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Compute the operations for `document` without touching the store.
    pub fn plan<S>(&self, document: &str, store: &S) -> ReconcilePlan
    where
        S: TagStoreView + ?Sized,
    {
        let parsed = parse_document(document, &self.home);
        let operations = compute_operations(&parsed.desired, store);
        debug!(
            paths = parsed.desired.len(),
            operations = operations.len(),
            skipped = parsed.malformed.len(),
            "Planned reconciliation"
        );
        ReconcilePlan {
            operations,
            warnings: parsed.malformed,
        }
    }

    /// Plan, apply, and save. Returns the applied plan.
    pub fn reconcile<S>(&self, document: &str, store: &mut S) -> Result<ReconcilePlan, TagError>
    where
        S: TagStore + ?Sized,
    {
        let plan = self.plan(document, &*store);
        apply_operations(&plan.operations, store)?;
        store
            .save()
            .map_err(|e| TagError::StoreWriteFailure(e.to_string()))?;
        info!(operations = plan.operations.len(), "Tags reconciled");
        Ok(plan)
    }
}

/// Apply operations in order. Each targets a distinct (tag, path) pair.
pub fn apply_operations<S>(operations: &[Operation], store: &mut S) -> Result<(), TagError>
where
    S: TagStore + ?Sized,
{
    for op in operations {
        debug!(%op, "Applying operation");
        match op {
            Operation::Add { tag, path } => {
                store.add(tag, path)?;
            }
            Operation::Remove { tag, path } => {
                store.remove(tag, path);
            }
        }
    }
    Ok(())
}
