//! Environment source: PATHTAG__SECTION__KEY variables.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};

/// Prefix for configuration overrides, e.g. `PATHTAG__DISCOVERY__MAX_DEPTH=4`.
pub const ENV_PREFIX: &str = "PATHTAG";

/// Add environment overrides to the builder. They win over every file source.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    )
}
