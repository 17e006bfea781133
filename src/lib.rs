//! Pathtag: directory tagging for multi-repository workspaces
//!
//! Tags are kept in a JSON store mapping each tag to the directories carrying it.
//! Besides direct `add`/`rm`/`list`, tags can be edited in bulk: repository roots
//! are discovered, rendered as an editable snapshot, and the edited snapshot is
//! reconciled back into the store with the minimal set of operations.

pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod logging;
pub mod reconcile;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod tags;
pub mod tokenizer;
