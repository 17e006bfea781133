//! Configuration merge policy.

pub mod merge_policy;
