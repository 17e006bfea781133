//! Tag commands: single-tag add/remove/list and the discover-edit-reconcile workflow.

mod commands;

pub use commands::{
    DiscoverOutcome, DiscoverRequest, TagChange, TagCommandService, TargetsOutcome,
};
