//! Suggest command implementation.
//!
//! The `extdoctor suggest <binding>` command lists unused key combinations
//! that could replace a binding.

use async_trait::async_trait;

use crate::analysis::normalize_keybinding;
use crate::cli::args::SuggestArgs;
use crate::engine::DiagnosticsEngine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::show_json;

/// The suggest command implementation.
pub struct SuggestCommand<'a> {
    engine: &'a DiagnosticsEngine,
    args: SuggestArgs,
}

impl<'a> SuggestCommand<'a> {
    /// Create a new suggest command.
    pub fn new(engine: &'a DiagnosticsEngine, args: SuggestArgs) -> Self {
        Self { engine, args }
    }
}

#[async_trait(?Send)]
impl Command for SuggestCommand<'_> {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let suggestions = self.engine.suggest_keybindings(&self.args.binding).await?;

        if self.args.json {
            show_json(ui, &suggestions)?;
        } else if suggestions.is_empty() {
            ui.warning("Every candidate binding is already in use");
        } else {
            ui.message(&format!(
                "Unused alternatives to {}:",
                normalize_keybinding(&self.args.binding)
            ));
            for binding in &suggestions {
                ui.raw(&format!("  {}", binding));
            }
        }
        Ok(CommandResult::success())
    }
}
