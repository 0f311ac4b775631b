//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::cli::args::{Cli, Commands};
use crate::cli::host::{build_engine, HostOverrides};
use crate::config::load_config;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
#[async_trait(?Send)]
pub trait Command {
    /// Execute the command, writing output through `ui`.
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher that discovers config in `working_dir`.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Get the working directory.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Dispatch and execute a command.
    pub async fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if let Commands::Completions(args) = &cli.command {
            return super::completions::CompletionsCommand::new(args.clone())
                .execute(ui)
                .await;
        }

        let mut config = load_config(&self.working_dir, cli.config.as_deref())?;
        if let Commands::Fix(args) = &cli.command {
            if args.dry_run {
                config.remediation.auto_apply = false;
            }
        }
        let engine = build_engine(config, HostOverrides::from(cli)).await?;

        match &cli.command {
            Commands::Analyze(args) => {
                super::analyze::AnalyzeCommand::new(&engine, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Fix(args) => {
                super::fix::FixCommand::new(&engine, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Remediate(args) => {
                super::remediate::RemediateCommand::new(&engine, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Suggest(args) => {
                super::suggest::SuggestCommand::new(&engine, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Logs(args) => {
                super::logs::LogsCommand::new(&engine, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Errors(args) => {
                super::errors::ErrorsCommand::new(&engine, args.clone())
                    .execute(ui)
                    .await
            }
            Commands::Completions(_) => Ok(CommandResult::success()),
        }
    }
}
