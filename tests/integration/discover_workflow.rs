//! End-to-end discover workflow: walk, render, edit, reconcile, save

use crate::integration::test_utils::{make_repos, ScriptedEditor};
use pathtag::discover::WalkerConfig;
use pathtag::error::TagError;
use pathtag::reconcile::Operation;
use pathtag::store::{JsonTagStore, MemoryTagStore, TagStore, TagStoreView};
use pathtag::tags::{DiscoverRequest, TagCommandService};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn request(root: &Path, home: &Path) -> DiscoverRequest {
    DiscoverRequest {
        root: root.to_path_buf(),
        home: home.to_path_buf(),
        walker: WalkerConfig::default(),
    }
}

#[test]
fn test_snapshot_lists_repos_with_current_tags() {
    let temp_dir = TempDir::new().unwrap();
    let repos = make_repos(temp_dir.path(), &["b-repo", "a-repo", "nested/c-repo"]);
    fs::create_dir_all(temp_dir.path().join("not-a-repo")).unwrap();

    let mut store = MemoryTagStore::new();
    store.add("work", &repos[0]).unwrap();

    let editor = ScriptedEditor::new(|doc: &str| doc.to_string());
    let home = dunce::canonicalize(temp_dir.path()).unwrap();
    let outcome =
        TagCommandService::discover(&mut store, &editor, &request(temp_dir.path(), &home))
            .unwrap();

    let shown = editor.shown();
    let data: Vec<Vec<&str>> = shown
        .lines()
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(|l| l.split_whitespace().collect())
        .collect();
    assert_eq!(
        data,
        vec![
            vec!["~/a-repo"],
            vec!["~/b-repo", "@work"],
            vec!["~/nested/c-repo"]
        ]
    );
    assert_eq!(outcome.directories, 3);
    assert!(outcome.operations.is_empty());
    assert_eq!(store.save_count(), 1);
}

#[test]
fn test_edits_are_applied_and_saved() {
    let temp_dir = TempDir::new().unwrap();
    let repos = make_repos(temp_dir.path(), &["one", "two"]);
    let store_path = temp_dir.path().join("tags.json");

    let mut store = JsonTagStore::open(&store_path).unwrap();
    store.add("old", &repos[1]).unwrap();
    store.save().unwrap();

    let home = dunce::canonicalize(temp_dir.path()).unwrap();
    let editor = ScriptedEditor::new(|doc: &str| {
        doc.lines()
            .map(|line| match line {
                "~/one" => "~/one @new #urgent".to_string(),
                l if l.starts_with("~/two") => "~/two".to_string(),
                l => l.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    });
    let outcome =
        TagCommandService::discover(&mut store, &editor, &request(temp_dir.path(), &home))
            .unwrap();

    assert_eq!(
        outcome.operations,
        vec![
            Operation::Add {
                tag: "new".to_string(),
                path: repos[0].clone()
            },
            Operation::Add {
                tag: "urgent".to_string(),
                path: repos[0].clone()
            },
            Operation::Remove {
                tag: "old".to_string(),
                path: repos[1].clone()
            },
        ]
    );

    let reopened = JsonTagStore::open(&store_path).unwrap();
    assert_eq!(reopened.get("new"), &[repos[0].clone()]);
    assert!(reopened.all_tags().get("old").is_none());
}

#[test]
fn test_editor_failure_is_a_warning_and_content_still_applies() {
    let temp_dir = TempDir::new().unwrap();
    let repos = make_repos(temp_dir.path(), &["one"]);
    let home = dunce::canonicalize(temp_dir.path()).unwrap();

    let mut store = MemoryTagStore::new();
    let editor = ScriptedEditor::new(|doc: &str| doc.replace("~/one", "~/one @t")).exiting_with(3);
    let outcome =
        TagCommandService::discover(&mut store, &editor, &request(temp_dir.path(), &home))
            .unwrap();

    assert!(outcome
        .warnings
        .iter()
        .any(|w| matches!(w, TagError::EditorExitedNonzero { code: 3, .. })));
    assert_eq!(store.get("t"), &[repos[0].clone()]);
}

#[test]
fn test_missing_root_still_runs_editor_on_empty_snapshot() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = MemoryTagStore::new();
    let editor = ScriptedEditor::new(|doc: &str| doc.to_string());

    let outcome = TagCommandService::discover(
        &mut store,
        &editor,
        &request(&temp_dir.path().join("absent"), temp_dir.path()),
    )
    .unwrap();

    assert_eq!(outcome.directories, 0);
    assert!(matches!(outcome.warnings[0], TagError::PathNotFound(_)));
    assert!(editor
        .shown()
        .lines()
        .all(|l| l.is_empty() || l.starts_with('#')));
}

#[test]
fn test_tags_outside_the_root_are_untouched() {
    let temp_dir = TempDir::new().unwrap();
    make_repos(temp_dir.path(), &["inside"]);
    let home = dunce::canonicalize(temp_dir.path()).unwrap();

    let mut store = MemoryTagStore::with_tags(vec![("work", vec!["/elsewhere/repo"])]).unwrap();
    let editor = ScriptedEditor::new(|doc: &str| doc.to_string());
    TagCommandService::discover(&mut store, &editor, &request(temp_dir.path(), &home)).unwrap();

    assert!(store.contains("work", Path::new("/elsewhere/repo")));
}

#[cfg(unix)]
#[test]
fn test_real_editor_session_round_trip() {
    use pathtag::session::{EditSession, EditorCommand};

    let temp_dir = TempDir::new().unwrap();
    let repos = make_repos(temp_dir.path(), &["one"]);
    let home = dunce::canonicalize(temp_dir.path()).unwrap();

    let script = temp_dir.path().join("edit.sed");
    fs::write(&script, "s|^~/one$|~/one @sed|\n").unwrap();
    let command = format!("sed -i -f {}", script.display());

    let mut store = MemoryTagStore::new();
    let session = EditSession::new(EditorCommand::parse(&command).unwrap())
        .with_temp_path(temp_dir.path().join("edit.txt"));
    let outcome =
        TagCommandService::discover(&mut store, &session, &request(temp_dir.path(), &home))
            .unwrap();

    assert_eq!(outcome.operations.len(), 1);
    assert_eq!(store.get("sed"), &[repos[0].clone()]);
}
