//! CLI route tests: commands executed through RunContext with an explicit config

use crate::integration::test_utils::{make_repos, with_xdg_env};
use pathtag::cli::{Commands, OutputFormat, RunContext};
use pathtag::store::{JsonTagStore, TagStoreView};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn context(test_dir: &TempDir, format: OutputFormat) -> RunContext {
    let config_file = test_dir.path().join("pathtag.toml");
    std::fs::write(
        &config_file,
        format!(
            "[store]\npath = \"{}\"\n\n[editor]\ntemp_file = \"{}\"\n",
            test_dir.path().join("tags.json").display(),
            test_dir.path().join("edit.txt").display()
        ),
    )
    .unwrap();
    RunContext::new(Some(config_file), Some(test_dir.path().to_path_buf()), format)
        .unwrap()
        .with_cwd(test_dir.path())
}

fn add(tag: &str, paths: &[&str]) -> Commands {
    Commands::Add {
        tag: tag.to_string(),
        paths: paths.iter().map(PathBuf::from).collect(),
    }
}

#[test]
fn test_add_emits_json_operation_records() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let repos = make_repos(test_dir.path(), &["alpha", "beta"]);
        let ctx = context(&test_dir, OutputFormat::Json);

        let output = ctx.execute(&add("@work", &["alpha", "beta"])).unwrap();
        let records: Vec<serde_json::Value> = output
            .body
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["op"], "add");
        assert_eq!(records[0]["tag"], "work");
        assert_eq!(records[1]["path"], serde_json::json!(repos[1]));
        assert!(output.warnings.is_empty());
    });
}

#[test]
fn test_list_json_after_add_and_rm() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let repos = make_repos(test_dir.path(), &["alpha", "beta"]);
        let ctx = context(&test_dir, OutputFormat::Json);

        ctx.execute(&add("work", &["alpha", "beta"])).unwrap();
        ctx.execute(&Commands::Rm {
            tag: "work".to_string(),
            paths: vec![PathBuf::from("alpha")],
        })
        .unwrap();

        let output = ctx
            .execute(&Commands::List {
                tag: Some("work".to_string()),
            })
            .unwrap();
        let listed: Vec<PathBuf> = serde_json::from_str(&output.body).unwrap();
        assert_eq!(listed, vec![repos[1].clone()]);

        let store = JsonTagStore::open(ctx.store_path()).unwrap();
        assert_eq!(store.get("work"), &[repos[1].clone()]);
    });
}

#[test]
fn test_list_human_when_empty() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let ctx = context(&test_dir, OutputFormat::Human);
        let output = ctx.execute(&Commands::List { tag: None }).unwrap();
        assert_eq!(output.body, "No tags have been defined.");

        let output = ctx
            .execute(&Commands::List {
                tag: Some("@nope".to_string()),
            })
            .unwrap();
        assert_eq!(output.body, "No paths tagged @nope.");
    });
}

#[test]
fn test_add_missing_path_reports_json_warning() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let ctx = context(&test_dir, OutputFormat::Json);
        let output = ctx.execute(&add("work", &["ghost"])).unwrap();
        assert!(output.body.is_empty());
        assert_eq!(output.warnings.len(), 1);
        let warning: serde_json::Value = serde_json::from_str(&output.warnings[0]).unwrap();
        assert_eq!(warning["warning"], "path_not_found");
    });
}

#[cfg(unix)]
#[test]
fn test_discover_with_noop_editor() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        make_repos(test_dir.path(), &["alpha"]);
        let ctx = context(&test_dir, OutputFormat::Human);
        ctx.execute(&add("work", &["alpha"])).unwrap();

        let output = ctx
            .execute(&Commands::Discover {
                root: None,
                editor: Some("true".to_string()),
            })
            .unwrap();
        assert!(output.body.contains("Tags updated"));
        assert!(output.warnings.is_empty());

        let staged = std::fs::read_to_string(test_dir.path().join("edit.txt")).unwrap();
        assert!(staged.contains("~/alpha  @work"));
    });
}

#[test]
fn test_invalid_config_fails_context_creation() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config_file = test_dir.path().join("bad.toml");
        std::fs::write(&config_file, "[editor]\ncommand = \"\"\n").unwrap();
        let result = RunContext::new(
            Some(config_file),
            Some(Path::new("/home/x").to_path_buf()),
            OutputFormat::Human,
        );
        assert!(result.is_err());
    });
}

#[test]
fn test_relative_home_flag_resolves_against_cwd() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config_file = test_dir.path().join("pathtag.toml");
        std::fs::write(&config_file, "").unwrap();
        let ctx = RunContext::new(
            Some(config_file),
            Some(PathBuf::from("some/home")),
            OutputFormat::Human,
        )
        .unwrap();
        assert!(ctx.home().is_absolute());
        assert_eq!(
            ctx.home(),
            std::env::current_dir().unwrap().join("some/home")
        );
    });
}

#[test]
fn test_relative_home_in_config_is_rejected() {
    let test_dir = TempDir::new().unwrap();
    with_xdg_env(&test_dir, || {
        let config_file = test_dir.path().join("pathtag.toml");
        std::fs::write(&config_file, "home = \"relative/home\"\n").unwrap();
        let result = RunContext::new(Some(config_file), None, OutputFormat::Human);
        assert!(matches!(result, Err(pathtag::error::TagError::ConfigError(_))));
    });
}
