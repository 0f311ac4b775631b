//! Command-line interface for extdoctor.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`host`] - Filesystem-backed engine construction

pub mod args;
pub mod commands;
pub mod host;

pub use args::{
    AnalyzeArgs, Cli, Commands, CompletionsArgs, ErrorsArgs, FixArgs, LogsArgs, RemediateArgs,
    SuggestArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
pub use host::{build_engine, HostOverrides};
