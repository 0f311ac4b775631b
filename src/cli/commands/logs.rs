//! Logs command implementation.
//!
//! The `extdoctor logs <source>` command prints the parsed entries of one
//! log source.

use async_trait::async_trait;

use crate::cli::args::LogsArgs;
use crate::engine::DiagnosticsEngine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_json, show_log_entry};

/// The logs command implementation.
pub struct LogsCommand<'a> {
    engine: &'a DiagnosticsEngine,
    args: LogsArgs,
}

impl<'a> LogsCommand<'a> {
    /// Create a new logs command.
    pub fn new(engine: &'a DiagnosticsEngine, args: LogsArgs) -> Self {
        Self { engine, args }
    }
}

#[async_trait(?Send)]
impl Command for LogsCommand<'_> {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let entries = self.engine.get_logs(&self.args.source).await;

        if self.args.json {
            show_json(ui, &entries)?;
            return Ok(CommandResult::success());
        }

        if entries.is_empty() {
            let sources = self.engine.log_sources().await;
            ui.warning(&format!("No log entries for '{}'", self.args.source));
            if !sources.is_empty() {
                ui.message(&format!("Known sources: {}", sources.join(", ")));
            }
            return Ok(CommandResult::success());
        }

        for entry in &entries {
            show_log_entry(ui, entry);
        }
        Ok(CommandResult::success())
    }
}
