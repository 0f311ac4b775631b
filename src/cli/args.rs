//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// extdoctor - Find and fix misconfigured editor extensions.
#[derive(Debug, Parser)]
#[command(name = "extdoctor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ./.extdoctor.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding one sub-directory per installed extension
    #[arg(long, global = true, env = "EXTDOCTOR_EXTENSIONS_DIR")]
    pub extensions_dir: Option<PathBuf>,

    /// File listing the command ids registered at runtime
    #[arg(long, global = true)]
    pub commands_file: Option<PathBuf>,

    /// Directory holding one sub-directory of *.log files per source
    #[arg(long, global = true, env = "EXTDOCTOR_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze installed extensions for conflicts
    Analyze(AnalyzeArgs),

    /// Add missing activation events to extension manifests
    Fix(FixArgs),

    /// Show the manual fix for one command
    Remediate(RemediateArgs),

    /// Suggest unused keybindings
    Suggest(SuggestArgs),

    /// Show parsed log entries for one source
    Logs(LogsArgs),

    /// Show the most recent errors across all log sources
    Errors(ErrorsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `analyze` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AnalyzeArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `fix` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FixArgs {
    /// Show planned manifest edits without writing them
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `remediate` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RemediateArgs {
    /// Command id named by a conflict
    pub command_id: String,
}

/// Arguments for the `suggest` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SuggestArgs {
    /// Binding being replaced, e.g. ctrl+shift+k
    pub binding: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `logs` command.
#[derive(Debug, Clone, clap::Args)]
pub struct LogsArgs {
    /// Log source (directory name under the log root)
    pub source: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `errors` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ErrorsArgs {
    /// Maximum number of entries (defaults to logs.recent_error_limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
