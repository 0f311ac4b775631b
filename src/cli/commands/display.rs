//! Shared display helpers for conflicts and log entries.

use serde::Serialize;

use crate::analysis::{AnalysisSummary, Conflict};
use crate::error::Result;
use crate::logs::{LogEntry, LogLevel};
use crate::ui::UserInterface;

/// Print a value as pretty JSON.
pub fn show_json<T: Serialize + ?Sized>(ui: &mut dyn UserInterface, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(anyhow::Error::from)?;
    ui.raw(&text);
    Ok(())
}

/// Print one conflict as a finding.
pub fn show_conflict(ui: &mut dyn UserInterface, conflict: &Conflict) {
    let title = format!("{} {} [{}]", conflict.kind, conflict.id, conflict.code);
    let detail = format!("{} ({})", conflict.description, conflict.sources.join(", "));
    ui.finding(conflict.severity, &title, &detail);
}

/// One-line summary of an analysis run.
pub fn summary_line(summary: &AnalysisSummary) -> String {
    format!(
        "{} error(s), {} warning(s)",
        summary.errors, summary.warnings
    )
}

/// Print one log entry, styled by level.
pub fn show_log_entry(ui: &mut dyn UserInterface, entry: &LogEntry) {
    let line = format!(
        "{} [{}] [{}] {}",
        entry.timestamp, entry.source, entry.level, entry.message
    );
    match entry.level {
        LogLevel::Error => ui.error(&line),
        LogLevel::Warn => ui.warning(&line),
        LogLevel::Info | LogLevel::Debug => ui.message(&line),
    }
}
