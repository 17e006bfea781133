//! CLI presentation: human and JSON rendering of command results.

use crate::cli::parse::OutputFormat;
use crate::discover::path::display_path;
use crate::error::{StoreError, TagError};
use crate::reconcile::Operation;
use crate::store::TagQueryResult;
use crate::tags::{DiscoverOutcome, TargetsOutcome};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, TagError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| TagError::Store(StoreError::Serialization(e)))
}

fn join_paths(paths: &[PathBuf], home: &Path) -> String {
    paths
        .iter()
        .map(|p| display_path(p, home))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `add` / `rm` result: one line or record per requested change.
pub fn format_targets_result(outcome: &TargetsOutcome, format: OutputFormat, home: &Path) -> String {
    outcome
        .changes
        .iter()
        .map(|change| match format {
            OutputFormat::Human => format!(
                "{} {} {} => [{}]",
                match change.operation {
                    Operation::Add { .. } => "add",
                    Operation::Remove { .. } => "remove",
                },
                format!("@{}", change.operation.tag()).bold(),
                display_path(change.operation.path(), home),
                join_paths(&change.paths_now, home)
            ),
            OutputFormat::Json => serde_json::to_string(&change.operation)
                .unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e)),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `list` result. JSON output stays parseable when nothing matched.
pub fn format_query_result(
    result: &TagQueryResult,
    tag: Option<&str>,
    format: OutputFormat,
    home: &Path,
) -> Result<String, TagError> {
    match (result, format) {
        (TagQueryResult::SinglePathList(paths), OutputFormat::Json) => to_json(paths),
        (TagQueryResult::AllTagsMap(map), OutputFormat::Json) => to_json(map),
        (TagQueryResult::Empty, OutputFormat::Json) => Ok(if tag.is_some() {
            "[]".to_string()
        } else {
            "{}".to_string()
        }),
        (TagQueryResult::SinglePathList(paths), OutputFormat::Human) => Ok(format!(
            "Paths tagged {}: {}",
            format!("@{}", tag.unwrap_or_default()).bold(),
            join_paths(paths, home)
        )),
        (TagQueryResult::AllTagsMap(map), OutputFormat::Human) => {
            let mut table = Table::new();
            table.load_preset(UTF8_BORDERS_ONLY);
            table.set_header(vec!["Tag", "Paths"]);
            for (tag, paths) in map {
                let shown: Vec<String> = paths.iter().map(|p| display_path(p, home)).collect();
                table.add_row(vec![format!("@{}", tag), shown.join("\n")]);
            }
            Ok(table.to_string())
        }
        (TagQueryResult::Empty, OutputFormat::Human) => Ok(match tag {
            Some(tag) => format!("No paths tagged @{}.", tag),
            None => "No tags have been defined.".to_string(),
        }),
    }
}

/// `discover` result.
pub fn format_discover_result(outcome: &DiscoverOutcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => {
            let mut lines: Vec<String> = outcome.operations.iter().map(|op| op.to_string()).collect();
            lines.push(
                "Tags updated. Run `pathtag list` to see the current state.".to_string(),
            );
            lines.join("\n")
        }
        OutputFormat::Json => outcome
            .operations
            .iter()
            .map(|op| {
                serde_json::to_string(op).unwrap_or_else(|e| format!("{{\"error\":\"{}\"}}", e))
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
