//! Config loader: the single entry point that assembles all configuration sources.

use crate::config::merge::merge_policy::builder_with_defaults;
use crate::config::sources::{env, global_file};
use crate::config::PathTagConfig;
use crate::error::TagError;
use config::File;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration: defaults, then the global config file, then environment.
    pub fn load() -> Result<PathTagConfig, TagError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder);
        let builder = env::add_to_builder(builder);
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load configuration from an explicit file instead of the global one.
    /// Environment overrides still apply.
    pub fn load_from_file(path: &Path) -> Result<PathTagConfig, TagError> {
        if !path.exists() {
            return Err(TagError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path).required(true));
        let builder = env::add_to_builder(builder);
        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load from `path` when given, otherwise from the default locations.
    pub fn load_optional(path: Option<&Path>) -> Result<PathTagConfig, TagError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }
}
