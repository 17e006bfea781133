//! CLI domain: parse, route, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{map_error, map_warning};
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{format_discover_result, format_query_result, format_targets_result};
pub use route::{CommandOutput, RunContext};
