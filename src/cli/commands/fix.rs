//! Fix command implementation.
//!
//! The `extdoctor fix` command adds missing `onCommand:` activation events
//! to extension manifests in one transaction. With `--dry-run` (or
//! `remediation.auto_apply: false`) it only lists the planned edits.

use async_trait::async_trait;

use crate::cli::args::FixArgs;
use crate::engine::DiagnosticsEngine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The fix command implementation.
pub struct FixCommand<'a> {
    engine: &'a DiagnosticsEngine,
    args: FixArgs,
}

impl<'a> FixCommand<'a> {
    /// Create a new fix command.
    pub fn new(engine: &'a DiagnosticsEngine, args: FixArgs) -> Self {
        Self { engine, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &FixArgs {
        &self.args
    }
}

#[async_trait(?Send)]
impl Command for FixCommand<'_> {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let outcome = self.engine.run_batch_remediation().await?;

        for failure in &outcome.failures {
            ui.warning(&format!("Skipped {}: {}", failure.component_id, failure.message));
        }

        if !outcome.success {
            ui.error(&outcome.message);
            return Ok(CommandResult::failure(1));
        }

        if outcome.applied {
            for edit in &outcome.edits {
                ui.message(&format!("  updated {}", edit.location.display()));
            }
            ui.success(&outcome.message);
        } else if outcome.edits.is_empty() {
            ui.success(&outcome.message);
        } else {
            for edit in &outcome.edits {
                ui.message(&format!("  would update {}", edit.location.display()));
            }
            ui.warning(&outcome.message);
        }

        if outcome.failures.is_empty() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}
