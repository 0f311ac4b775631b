//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait so commands can be tested against [`MockUI`]
//! - [`TerminalUI`] for real terminal output
//! - [`DoctorTheme`] styles and the [`ProgressSpinner`]
//!
//! # Example
//!
//! ```
//! use extdoctor::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("3 components scanned");
//! ui.success("No conflicts found");
//!
//! assert!(ui.messages().contains(&"3 components scanned".to_string()));
//! assert!(ui.successes().contains(&"No conflicts found".to_string()));
//! ```

pub mod mock;
pub mod output;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use output::OutputMode;
pub use spinner::ProgressSpinner;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, DoctorTheme};

use crate::analysis::Severity;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Display one finding with its severity.
    fn finding(&mut self, severity: Severity, title: &str, detail: &str);

    /// Write raw text (machine-readable output). Shown in every mode.
    fn raw(&mut self, text: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);

    /// Remove the spinner without a final message.
    fn finish_clear(&mut self);
}

/// Create the terminal UI for a mode.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
