//! Analyze command implementation.
//!
//! The `extdoctor analyze` command runs every conflict rule and reports the
//! findings. It exits with status 1 when any finding is an error.

use crate::analysis::AnalysisSummary;
use crate::cli::args::AnalyzeArgs;
use crate::engine::DiagnosticsEngine;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{show_conflict, show_json, summary_line};

use async_trait::async_trait;

/// The analyze command implementation.
pub struct AnalyzeCommand<'a> {
    engine: &'a DiagnosticsEngine,
    args: AnalyzeArgs,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command.
    pub fn new(engine: &'a DiagnosticsEngine, args: AnalyzeArgs) -> Self {
        Self { engine, args }
    }
}

#[async_trait(?Send)]
impl Command for AnalyzeCommand<'_> {
    async fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let conflicts = if self.args.json {
            self.engine.run_full_analysis().await?
        } else {
            let mut spinner = ui.start_spinner("Analyzing extensions...");
            match self.engine.run_full_analysis().await {
                Ok(conflicts) => {
                    spinner.finish_clear();
                    conflicts
                }
                Err(e) => {
                    spinner.finish_error("Analysis failed");
                    return Err(e);
                }
            }
        };
        let summary = AnalysisSummary::from_conflicts(&conflicts);

        if self.args.json {
            show_json(ui, &conflicts)?;
        } else if conflicts.is_empty() {
            ui.success("No conflicts found");
        } else {
            for conflict in &conflicts {
                show_conflict(ui, conflict);
            }
            let line = summary_line(&summary);
            if summary.has_errors() {
                ui.error(&line);
            } else {
                ui.warning(&line);
            }
        }

        if summary.has_errors() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Severity;
    use crate::cli::commands::fixtures::engine;
    use crate::config::EngineConfig;
    use crate::ui::MockUI;
    use serde_json::json;

    #[tokio::test]
    async fn clean_snapshot_succeeds() {
        let manifest = json!({
            "activationEvents": ["onCommand:a.run"],
            "contributes": {"commands": [{"command": "a.run"}]}
        });
        let (engine, _) = engine(&[("acme.a", manifest)], &["a.run"], EngineConfig::default()).await;
        let mut ui = MockUI::new();

        let result = AnalyzeCommand::new(&engine, AnalyzeArgs::default())
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("No conflicts"));
    }

    #[tokio::test]
    async fn errors_fail_the_command() {
        let manifest = |_| {
            json!({
                "activationEvents": ["onCommand:shared.run"],
                "contributes": {"commands": [{"command": "shared.run"}]}
            })
        };
        let (engine, _) = engine(
            &[("acme.a", manifest(1)), ("acme.b", manifest(2))],
            &["shared.run"],
            EngineConfig::default(),
        )
        .await;
        let mut ui = MockUI::new();

        let result = AnalyzeCommand::new(&engine, AnalyzeArgs::default())
            .execute(&mut ui)
            .await
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.findings().len(), 1);
        assert_eq!(ui.findings()[0].0, Severity::Error);
        assert!(ui.has_error("1 error(s), 0 warning(s)"));
    }

    #[tokio::test]
    async fn json_output_lists_conflicts() {
        let manifest = json!({"contributes": {"commands": [{"command": "a.run"}]}});
        let (engine, _) = engine(&[("acme.a", manifest)], &["a.run"], EngineConfig::default()).await;
        let mut ui = MockUI::new();

        let result = AnalyzeCommand::new(&engine, AnalyzeArgs { json: true })
            .execute(&mut ui)
            .await
            .unwrap();

        assert!(result.success);
        let parsed: serde_json::Value = serde_json::from_str(&ui.raw_output()[0]).unwrap();
        assert_eq!(parsed[0]["code"], "missing-activation-event");
        assert!(ui.spinners().is_empty());
    }
}
