//! Remediate command implementation.
//!
//! The `extdoctor remediate <command-id>` command shows the manual fix for
//! a conflict about one command. It never modifies files.

use async_trait::async_trait;

use crate::analysis::ConflictCode;
use crate::cli::args::RemediateArgs;
use crate::engine::DiagnosticsEngine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The remediate command implementation.
pub struct RemediateCommand<'a> {
    engine: &'a DiagnosticsEngine,
    args: RemediateArgs,
}

impl<'a> RemediateCommand<'a> {
    /// Create a new remediate command.
    pub fn new(engine: &'a DiagnosticsEngine, args: RemediateArgs) -> Self {
        Self { engine, args }
    }
}

#[async_trait(?Send)]
impl Command for RemediateCommand<'_> {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let conflicts = self.engine.run_full_analysis().await?;
        let matching: Vec<_> = conflicts
            .iter()
            .filter(|c| c.id == self.args.command_id)
            .collect();

        let target = matching
            .iter()
            .find(|c| c.code == ConflictCode::MissingActivationEvent)
            .or_else(|| matching.first());

        let Some(conflict) = target else {
            ui.warning(&format!("No conflict found for '{}'", self.args.command_id));
            return Ok(CommandResult::failure(1));
        };

        let outcome = self.engine.run_single_remediation(conflict).await;
        if outcome.success {
            ui.success(&outcome.message);
            Ok(CommandResult::success())
        } else {
            ui.error(&outcome.message);
            Ok(CommandResult::failure(1))
        }
    }
}
