//! Pathtag CLI Binary
//!
//! Command-line interface for tagging directories and reconciling tags.

use clap::Parser;
use pathtag::cli::{map_error, Cli, OutputFormat, RunContext};
use pathtag::config::ConfigLoader;
use pathtag::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli);

    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("pathtag starting");

    let context = match RunContext::new(cli.config.clone(), cli.home.clone(), cli.format) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error initializing: {}", e);
            eprintln!("{}", map_error(&e, cli.format));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            info!("Command completed successfully");
            // JSON warnings are records in the same stream as the result.
            for warning in &output.warnings {
                match cli.format {
                    OutputFormat::Human => eprintln!("{}", warning),
                    OutputFormat::Json => println!("{}", warning),
                }
            }
            if !output.body.is_empty() {
                println!("{}", output.body);
            }
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e, cli.format));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file.
/// Precedence: CLI flags override environment override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    build_logging_config_with(cli, |key| std::env::var(key).ok())
}

fn build_logging_config_with<F>(cli: &Cli, lookup: F) -> LoggingConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = ConfigLoader::load_optional(cli.config.as_deref())
        .ok()
        .map(|c| c.logging)
        .unwrap_or_default();
    config.apply_env_overrides_with(lookup);

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }

    if config.enabled && config.output == "file" {
        if let Ok(path) =
            pathtag::logging::resolve_log_file_path(cli.log_file.clone(), config.file.clone())
        {
            config.file = Some(path);
        }
    } else if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config
}
