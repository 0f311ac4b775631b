//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::analysis::Severity;

use super::{
    should_use_colors, DoctorTheme, OutputMode, ProgressSpinner, SpinnerHandle, UserInterface,
};

/// Terminal UI implementation writing to stdout.
pub struct TerminalUI {
    term: Term,
    theme: DoctorTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            DoctorTheme::new()
        } else {
            DoctorTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn finding(&mut self, severity: Severity, title: &str, detail: &str) {
        writeln!(self.term, "{}", self.theme.format_finding(severity, title, detail)).ok();
    }

    fn raw(&mut self, text: &str) {
        writeln!(self.term, "{}", text).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() && self.term.is_term() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }
}
