//! Global config file source: $XDG_CONFIG_HOME/pathtag/config.toml or ~/.config/pathtag/config.toml

use crate::config::paths::global_config_path;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::File;
use tracing::debug;

/// Add the global config file to the builder if it exists.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    let Ok(path) = global_config_path() else {
        return builder;
    };
    if !path.exists() {
        debug!(config_path = %path.display(), "No global configuration file");
        return builder;
    }
    builder.add_source(File::from(path).required(false))
}
