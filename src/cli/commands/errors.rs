//! Errors command implementation.
//!
//! The `extdoctor errors` command prints the newest error entries across
//! every log source.

use async_trait::async_trait;

use crate::cli::args::ErrorsArgs;
use crate::engine::DiagnosticsEngine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_json, show_log_entry};

/// The errors command implementation.
pub struct ErrorsCommand<'a> {
    engine: &'a DiagnosticsEngine,
    args: ErrorsArgs,
}

impl<'a> ErrorsCommand<'a> {
    /// Create a new errors command.
    pub fn new(engine: &'a DiagnosticsEngine, args: ErrorsArgs) -> Self {
        Self { engine, args }
    }
}

#[async_trait(?Send)]
impl Command for ErrorsCommand<'_> {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let entries = self.engine.get_recent_errors(self.args.limit).await;

        if self.args.json {
            show_json(ui, &entries)?;
        } else if entries.is_empty() {
            ui.success("No recent errors");
        } else {
            for entry in &entries {
                show_log_entry(ui, entry);
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::host::memory::{
        InMemoryClipboard, InMemoryCommandTable, InMemoryFileEditor, InMemoryRegistry,
    };
    use crate::logs::LogMonitor;
    use crate::ui::MockUI;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn engine_over_logs(root: &std::path::Path) -> DiagnosticsEngine {
        DiagnosticsEngine::builder(
            Arc::new(InMemoryRegistry::default()),
            Arc::new(InMemoryCommandTable::default()),
            Arc::new(InMemoryFileEditor::new()),
            Arc::new(InMemoryClipboard::new()),
        )
        .config(EngineConfig::default())
        .log_monitor(LogMonitor::with_root(root))
        .build()
        .unwrap()
    }

    #[tokio::test]
    async fn prints_newest_errors_first() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("git");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("1.log"),
            "[2024-01-01T00:00:01] [git] [error] old\n[2024-01-01T00:00:02] [git] [error] new\n",
        )
        .unwrap();
        let engine = engine_over_logs(temp.path());
        let mut ui = MockUI::new();

        ErrorsCommand::new(
            &engine,
            ErrorsArgs {
                limit: Some(1),
                json: false,
            },
        )
        .execute(&mut ui)
        .await
        .unwrap();

        assert_eq!(ui.errors().len(), 1);
        assert!(ui.has_error("new"));
    }

    #[tokio::test]
    async fn reports_when_clean() {
        let temp = TempDir::new().unwrap();
        let engine = engine_over_logs(temp.path());
        let mut ui = MockUI::new();

        ErrorsCommand::new(&engine, ErrorsArgs::default())
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(ui.has_success("No recent errors"));
    }
}
