//! CLI argument definitions using clap derive API

use clap::{Args, Parser, ValueEnum};
use std::path::PathBuf;

/// Report which local SQL migrations a remote database has not applied yet
#[derive(Parser, Debug)]
#[command(name = "reconcile")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory of versioned migrations (e.g. supabase/migrations)
    pub migrations_dir: PathBuf,

    /// JSON document listing applied migrations, in any shape
    pub applied_json: PathBuf,

    /// Write pending filenames to this file, one per line
    #[arg(long, env = "RECONCILE_PENDING_OUT")]
    pub pending_out: Option<PathBuf>,

    /// Summary format on stdout
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Logging and configuration options
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write log lines to this file
    #[arg(long, env = "RECONCILE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Also write log lines to reconcile.log in this directory
    #[arg(long, env = "RECONCILE_LOG_DIR", conflicts_with = "log_file")]
    pub log_dir: Option<PathBuf>,

    /// Disable ANSI colors in log output
    #[arg(long)]
    pub no_color: bool,

    /// YAML config file with defaults for the options above
    #[arg(short, long, env = "RECONCILE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Summary output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Pretty-printed JSON
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
