//! Tag command service: one entry point per tag CLI command.
//!
//! Owns the workflow logic; the CLI parses, calls one method, and formats the result.

use crate::discover::path::{canonicalize_path, normalize_path, resolve_target};
use crate::discover::{attach_tags, discover, WalkerConfig};
use crate::error::TagError;
use crate::reconcile::{Operation, ReconciliationEngine};
use crate::session::DocumentEditor;
use crate::snapshot::SnapshotRenderer;
use crate::store::{validate_tag, TagQueryResult, TagStore, TagStoreView};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One requested (tag, path) change and its effect.
#[derive(Debug, Clone)]
pub struct TagChange {
    pub operation: Operation,
    /// False when the store already matched
    pub changed: bool,
    /// Paths carrying the tag after the change
    pub paths_now: Vec<PathBuf>,
}

/// Result of `add` / `rm`.
#[derive(Debug, Default)]
pub struct TargetsOutcome {
    pub changes: Vec<TagChange>,
    pub warnings: Vec<TagError>,
}

/// Input for the discover workflow.
#[derive(Debug, Clone)]
pub struct DiscoverRequest {
    pub root: PathBuf,
    pub home: PathBuf,
    pub walker: WalkerConfig,
}

/// Result of the discover workflow.
#[derive(Debug, Default)]
pub struct DiscoverOutcome {
    /// Number of repository roots shown in the snapshot
    pub directories: usize,
    /// Operations applied to the store
    pub operations: Vec<Operation>,
    /// Recoverable problems: missing root, editor failure, skipped lines
    pub warnings: Vec<TagError>,
}

pub struct TagCommandService;

impl TagCommandService {
    /// Tag each target (default: `cwd`). Missing targets are reported and skipped.
    pub fn add<S>(
        store: &mut S,
        tag: &str,
        targets: &[PathBuf],
        cwd: &Path,
    ) -> Result<TargetsOutcome, TagError>
    where
        S: TagStore + ?Sized,
    {
        validate_tag(tag).map_err(|e| TagError::InvalidTag(e.to_string()))?;

        let mut outcome = TargetsOutcome::default();
        for target in resolve_targets(targets, cwd) {
            let path = match canonicalize_path(&target) {
                Ok(path) => path,
                Err(err) => {
                    warn!(path = %target.display(), "Path not found, not tagging");
                    outcome.warnings.push(err);
                    continue;
                }
            };
            let changed = store.add(tag, &path)?;
            info!(tag, path = %path.display(), changed, "Tag added");
            outcome.changes.push(TagChange {
                paths_now: store.get(tag).to_vec(),
                operation: Operation::Add {
                    tag: tag.to_string(),
                    path,
                },
                changed,
            });
        }

        save(store)?;
        Ok(outcome)
    }

    /// Untag each target (default: `cwd`).
    ///
    /// A target that no longer exists on disk is reported but still untagged, so
    /// tags on deleted directories can be cleaned up.
    pub fn remove<S>(
        store: &mut S,
        tag: &str,
        targets: &[PathBuf],
        cwd: &Path,
    ) -> Result<TargetsOutcome, TagError>
    where
        S: TagStore + ?Sized,
    {
        let mut outcome = TargetsOutcome::default();
        for target in resolve_targets(targets, cwd) {
            let path = match canonicalize_path(&target) {
                Ok(path) => path,
                Err(err) => {
                    outcome.warnings.push(err);
                    target
                }
            };
            let changed = store.remove(tag, &path);
            info!(tag, path = %path.display(), changed, "Tag removed");
            outcome.changes.push(TagChange {
                paths_now: store.get(tag).to_vec(),
                operation: Operation::Remove {
                    tag: tag.to_string(),
                    path,
                },
                changed,
            });
        }

        save(store)?;
        Ok(outcome)
    }

    /// Resolve a list query.
    pub fn list<S>(store: &S, tag: Option<&str>) -> TagQueryResult
    where
        S: TagStoreView + ?Sized,
    {
        store.query(tag)
    }

    /// Discover repositories, let the user edit their tags, and reconcile the store.
    ///
    /// Nothing is written to the store until the editor has exited.
    pub fn discover<S, E>(
        store: &mut S,
        editor: &E,
        request: &DiscoverRequest,
    ) -> Result<DiscoverOutcome, TagError>
    where
        S: TagStore + ?Sized,
        E: DocumentEditor + ?Sized,
    {
        let discovery = discover(&request.root, &request.walker);
        let mut warnings = discovery.warnings;

        let directories = attach_tags(&discovery.directories, &*store);
        let document = SnapshotRenderer::new(&request.home).render(&directories);

        let edited = editor.edit(&document)?;
        warnings.extend(edited.warning);

        let plan = ReconciliationEngine::new(&request.home).reconcile(&edited.content, store)?;
        warnings.extend(plan.warnings);

        Ok(DiscoverOutcome {
            directories: directories.len(),
            operations: plan.operations,
            warnings,
        })
    }
}

fn resolve_targets(targets: &[PathBuf], cwd: &Path) -> Vec<PathBuf> {
    if targets.is_empty() {
        return vec![normalize_path(cwd)];
    }
    targets.iter().map(|t| resolve_target(cwd, t)).collect()
}

fn save<S>(store: &mut S) -> Result<(), TagError>
where
    S: TagStore + ?Sized,
{
    store
        .save()
        .map_err(|e| TagError::StoreWriteFailure(e.to_string()))
}
