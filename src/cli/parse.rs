//! CLI parse: clap types for pathtag. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// pathtag - tag directories and reconcile tags from an editable snapshot
#[derive(Parser)]
#[command(name = "pathtag")]
#[command(about = "Tag directories in a multi-repository workspace")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "human", global = true)]
    pub format: OutputFormat,

    /// Home prefix used for `~` and as the default discovery root
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// How results, warnings, and errors are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// One JSON document or record per line
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Tag directories (default: the current directory)
    Add {
        /// Tag name
        tag: String,
        /// Directories to tag
        paths: Vec<PathBuf>,
    },
    /// Remove a tag from directories (default: the current directory)
    #[command(alias = "remove")]
    Rm {
        /// Tag name
        tag: String,
        /// Directories to untag
        paths: Vec<PathBuf>,
    },
    /// List tagged paths, for one tag or all of them
    #[command(alias = "ls")]
    List {
        /// Tag name (omit to list every tag)
        tag: Option<String>,
    },
    /// Find repositories, edit their tags in your editor, and apply the edits
    Discover {
        /// Directory to search (default: the home prefix)
        root: Option<PathBuf>,
        /// Editor command (overrides config, GIT_EDITOR, VISUAL, and EDITOR)
        #[arg(long)]
        editor: Option<String>,
    },
}
