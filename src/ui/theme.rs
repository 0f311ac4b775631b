//! Visual theme and styling.

use console::Style;

use crate::analysis::Severity;

/// extdoctor's visual theme.
#[derive(Debug, Clone)]
pub struct DoctorTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
}

impl Default for DoctorTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a finding: severity tag, bold title, dim detail line.
    pub fn format_finding(&self, severity: Severity, title: &str, detail: &str) -> String {
        let tag = match severity {
            Severity::Error => self.error.apply_to("error").to_string(),
            Severity::Warning => self.warning.apply_to("warning").to_string(),
        };
        format!(
            "{} {}\n    {}",
            tag,
            self.highlight.apply_to(title),
            self.dim.apply_to(detail)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_status_lines() {
        let theme = DoctorTheme::plain();
        assert_eq!(theme.format_success("Complete"), "✓ Complete");
        assert_eq!(theme.format_warning("Caution"), "⚠ Caution");
        assert_eq!(theme.format_error("Failed"), "✗ Failed");
    }

    #[test]
    fn theme_formats_findings() {
        let theme = DoctorTheme::plain();
        let msg = theme.format_finding(Severity::Error, "command a.run", "declared twice");
        assert_eq!(msg, "error command a.run\n    declared twice");
        let msg = theme.format_finding(Severity::Warning, "keybinding", "shared");
        assert!(msg.starts_with("warning "));
    }

    #[test]
    fn default_impl_matches_new() {
        let default = DoctorTheme::default();
        let new = DoctorTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
