//! Tag store persistence through the add/rm/list services

use crate::integration::test_utils::make_repos;
use pathtag::error::TagError;
use pathtag::store::{JsonTagStore, TagQueryResult, TagStoreView};
use pathtag::tags::TagCommandService;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_add_then_list_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let repos = make_repos(temp_dir.path(), &["alpha", "beta"]);
    let store_path = temp_dir.path().join("state").join("tags.json");

    let mut store = JsonTagStore::open(&store_path).unwrap();
    let outcome = TagCommandService::add(
        &mut store,
        "work",
        &[PathBuf::from("alpha"), PathBuf::from("beta/")],
        temp_dir.path(),
    )
    .unwrap();
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.changes.len(), 2);
    assert!(outcome.changes.iter().all(|c| c.changed));

    let reopened = JsonTagStore::open(&store_path).unwrap();
    assert_eq!(
        TagCommandService::list(&reopened, Some("work")),
        TagQueryResult::SinglePathList(repos.clone())
    );
    assert_eq!(TagCommandService::list(&reopened, Some("other")), TagQueryResult::Empty);
}

#[test]
fn test_add_twice_reports_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    make_repos(temp_dir.path(), &["alpha"]);
    let store_path = temp_dir.path().join("tags.json");
    let repo = temp_dir.path().join("alpha");

    let mut store = JsonTagStore::open(&store_path).unwrap();
    TagCommandService::add(&mut store, "work", &[repo.clone()], temp_dir.path()).unwrap();
    let second = TagCommandService::add(&mut store, "work", &[repo], temp_dir.path()).unwrap();
    assert!(!second.changes[0].changed);
    assert_eq!(store.get("work").len(), 1);
}

#[test]
fn test_add_skips_missing_target_with_warning() {
    let temp_dir = TempDir::new().unwrap();
    let repos = make_repos(temp_dir.path(), &["alpha"]);
    let mut store = JsonTagStore::open(temp_dir.path().join("tags.json")).unwrap();

    let outcome = TagCommandService::add(
        &mut store,
        "work",
        &[PathBuf::from("alpha"), PathBuf::from("ghost")],
        temp_dir.path(),
    )
    .unwrap();
    assert_eq!(outcome.changes.len(), 1);
    assert!(matches!(outcome.warnings[0], TagError::PathNotFound(_)));
    assert_eq!(store.get("work"), repos.as_slice());
}

#[test]
fn test_rm_of_deleted_directory_still_untags() {
    let temp_dir = TempDir::new().unwrap();
    let repos = make_repos(temp_dir.path(), &["alpha"]);
    let store_path = temp_dir.path().join("tags.json");

    let mut store = JsonTagStore::open(&store_path).unwrap();
    TagCommandService::add(&mut store, "work", &repos, temp_dir.path()).unwrap();
    fs::remove_dir_all(&repos[0]).unwrap();

    let outcome =
        TagCommandService::remove(&mut store, "work", &repos, temp_dir.path()).unwrap();
    assert!(outcome.changes[0].changed);
    assert!(matches!(outcome.warnings[0], TagError::PathNotFound(_)));

    let reopened = JsonTagStore::open(&store_path).unwrap();
    assert!(reopened.all_tags().is_empty());
}

#[test]
fn test_invalid_tag_is_rejected_before_saving() {
    let temp_dir = TempDir::new().unwrap();
    let store_path = temp_dir.path().join("tags.json");
    let mut store = JsonTagStore::open(&store_path).unwrap();

    let result = TagCommandService::add(&mut store, "two words", &[], temp_dir.path());
    assert!(matches!(result, Err(TagError::InvalidTag(_))));
    assert!(!store_path.exists());
}

#[test]
fn test_unrelated_keys_survive_add() {
    let temp_dir = TempDir::new().unwrap();
    make_repos(temp_dir.path(), &["alpha"]);
    let store_path = temp_dir.path().join("tags.json");
    fs::write(&store_path, r#"{"directories": ["/srv"], "tags": {}}"#).unwrap();

    let mut store = JsonTagStore::open(&store_path).unwrap();
    TagCommandService::add(&mut store, "work", &[PathBuf::from("alpha")], temp_dir.path())
        .unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&store_path).unwrap()).unwrap();
    assert_eq!(value["directories"], serde_json::json!(["/srv"]));
    assert_eq!(value["tags"]["work"].as_array().unwrap().len(), 1);
}
