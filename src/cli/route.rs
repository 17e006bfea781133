//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::cli::output::map_warning;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_discover_result, format_query_result, format_targets_result,
};
use crate::config::{ConfigLoader, PathTagConfig};
use crate::discover::path::resolve_target;
use crate::error::{StoreError, TagError};
use crate::session::{resolve_editor, EditSession};
use crate::store::JsonTagStore;
use crate::tags::{DiscoverRequest, TagCommandService};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Text produced by one command.
#[derive(Debug, Default)]
pub struct CommandOutput {
    /// Command result, for stdout
    pub body: String,
    /// Formatted warnings, in the order they occurred
    pub warnings: Vec<String>,
}

/// Runtime context for CLI execution: resolved config, home prefix, store path.
pub struct RunContext {
    config: PathTagConfig,
    home: PathBuf,
    store_path: PathBuf,
    cwd: PathBuf,
    format: OutputFormat,
}

impl RunContext {
    /// Create a run context from an optional config path and home override. Uses ConfigLoader only.
    pub fn new(
        config_path: Option<PathBuf>,
        home_override: Option<PathBuf>,
        format: OutputFormat,
    ) -> Result<Self, TagError> {
        let config = ConfigLoader::load_optional(config_path.as_deref())?;
        config.ensure_valid()?;

        let cwd = std::env::current_dir().map_err(|e| TagError::Store(StoreError::IoError(e)))?;
        let home = match home_override {
            Some(home) => resolve_target(&cwd, &home),
            None => config.resolve_home()?,
        };
        let store_path = config.resolve_store_path(&home)?;

        debug!(home = %home.display(), store = %store_path.display(), "Run context ready");
        Ok(Self {
            config,
            home,
            store_path,
            cwd,
            format,
        })
    }

    /// Replace the directory relative targets resolve against.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    pub fn config(&self) -> &PathTagConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, TagError> {
        let mut store = JsonTagStore::open(&self.store_path)?;

        match command {
            Commands::Add { tag, paths } => {
                let outcome =
                    TagCommandService::add(&mut store, bare_tag(tag), paths, &self.cwd)?;
                Ok(CommandOutput {
                    body: format_targets_result(&outcome, self.format, &self.home),
                    warnings: self.warnings(&outcome.warnings),
                })
            }
            Commands::Rm { tag, paths } => {
                let outcome =
                    TagCommandService::remove(&mut store, bare_tag(tag), paths, &self.cwd)?;
                Ok(CommandOutput {
                    body: format_targets_result(&outcome, self.format, &self.home),
                    warnings: self.warnings(&outcome.warnings),
                })
            }
            Commands::List { tag } => {
                let tag = tag.as_deref().map(bare_tag);
                let result = TagCommandService::list(&store, tag);
                Ok(CommandOutput {
                    body: format_query_result(&result, tag, self.format, &self.home)?,
                    warnings: Vec::new(),
                })
            }
            Commands::Discover { root, editor } => {
                let editor =
                    resolve_editor(editor.as_deref(), self.config.editor.command.as_deref())?;
                let session = EditSession::new(editor)
                    .with_temp_path(self.config.resolve_temp_file(&self.home));
                let request = DiscoverRequest {
                    root: root
                        .as_ref()
                        .map(|r| resolve_target(&self.cwd, r))
                        .unwrap_or_else(|| self.home.clone()),
                    home: self.home.clone(),
                    walker: self.config.discovery.clone(),
                };
                info!(root = %request.root.display(), "Starting discover");
                let outcome = TagCommandService::discover(&mut store, &session, &request)?;
                info!(
                    directories = outcome.directories,
                    operations = outcome.operations.len(),
                    "Discover finished"
                );
                Ok(CommandOutput {
                    body: format_discover_result(&outcome, self.format),
                    warnings: self.warnings(&outcome.warnings),
                })
            }
        }
    }

    fn warnings(&self, warnings: &[TagError]) -> Vec<String> {
        warnings.iter().map(|w| map_warning(w, self.format)).collect()
    }
}

fn bare_tag(tag: &str) -> &str {
    tag.strip_prefix('@').unwrap_or(tag)
}
