//! Property-based tests for render/parse round trips and reconciliation invariants

use pathtag::discover::attach_tags;
use pathtag::reconcile::{candidate_universe, parse_document, ReconciliationEngine};
use pathtag::snapshot::SnapshotRenderer;
use pathtag::store::{MemoryTagStore, TagStore, TagStoreView};
use pathtag::tokenizer::{escape_path, split_by_space, unescape};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

const HOME: &str = "/home/me";

/// Absolute paths, some under the home prefix, with spaces and backslashes in names.
fn path_strategy() -> impl Strategy<Value = PathBuf> {
    (
        prop::sample::select(vec!["/home/me", "/home/meta", "/srv"]),
        prop::collection::vec("[a-z \\\\]{1,8}", 0..3),
    )
        .prop_map(|(base, components)| {
            let mut path = PathBuf::from(base);
            for component in components {
                path.push(component);
            }
            path
        })
}

/// tag -> paths. Some tag names carry a backslash, which the store must refuse.
fn store_strategy() -> impl Strategy<Value = BTreeMap<String, BTreeSet<PathBuf>>> {
    prop::collection::btree_map(
        "[a-z][a-z0-9_\\\\-]{0,5}",
        prop::collection::btree_set(path_strategy(), 1..4),
        0..5,
    )
}

/// Add every pair the store accepts. Tags with a backslash are rejected.
fn build_store(state: &BTreeMap<String, BTreeSet<PathBuf>>) -> MemoryTagStore {
    let mut store = MemoryTagStore::new();
    for (tag, paths) in state {
        for path in paths {
            let added = store.add(tag, path);
            assert_eq!(added.is_err(), tag.contains('\\'), "tag {:?}", tag);
        }
    }
    store
}

fn storable_tags(state: &BTreeMap<String, BTreeSet<PathBuf>>) -> usize {
    state.keys().filter(|tag| !tag.contains('\\')).count()
}

fn tagged_paths(state: &BTreeMap<String, BTreeSet<PathBuf>>) -> Vec<PathBuf> {
    let all: BTreeSet<PathBuf> = state.values().flatten().cloned().collect();
    all.into_iter().collect()
}

proptest! {
    #[test]
    fn escaped_path_is_one_token(text in "\\PC{1,24}") {
        let escaped = escape_path(&text);
        let tokens = split_by_space(&escaped);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(unescape(tokens[0]), text);
    }

    #[test]
    fn split_never_yields_empty_tokens(line in "[a-z @#\\\\]{0,40}") {
        prop_assert!(split_by_space(&line).iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn parse_of_render_matches_store(state in store_strategy()) {
        let store = build_store(&state);
        let dirs = attach_tags(&tagged_paths(&state), &store);
        let document = SnapshotRenderer::new(HOME).render(&dirs);

        let parsed = parse_document(&document, PathBuf::from(HOME).as_path());
        prop_assert!(parsed.malformed.is_empty());
        prop_assert_eq!(parsed.desired.len(), dirs.len());
        for dir in &dirs {
            prop_assert_eq!(parsed.desired.get(&dir.path), Some(&dir.tags));
        }
    }

    #[test]
    fn unedited_render_reconciles_to_nothing(state in store_strategy()) {
        let store = build_store(&state);
        let dirs = attach_tags(&tagged_paths(&state), &store);
        let document = SnapshotRenderer::new(HOME).render(&dirs);

        let plan = ReconciliationEngine::new(HOME).plan(&document, &store);
        prop_assert!(plan.operations.is_empty());
        prop_assert_eq!(store.all_tags().len(), storable_tags(&state));
    }
}

/// The candidate universe is sorted and has no duplicates, whatever overlaps.
#[test]
fn test_candidate_universe_dedup_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec("[a-c]{1,2}", 0..8),
                prop::collection::btree_set("[a-c]{1,2}", 0..8),
            ),
            |(known, desired)| {
                let universe = candidate_universe(known.iter(), &desired);

                assert!(universe.windows(2).all(|pair| pair[0] < pair[1]));
                for tag in known.iter().chain(desired.iter()) {
                    assert!(universe.contains(&tag.as_str()));
                }
                Ok(())
            },
        )
        .unwrap();
}
