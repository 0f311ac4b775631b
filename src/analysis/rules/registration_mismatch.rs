//! Declared-versus-registered command checks.
//!
//! For every non-built-in component this rule compares declared commands
//! against the live command table and the component's activation events:
//!
//! - an active component whose declared command is not registered has a
//!   ghost command (error)
//! - a declared command with no `onCommand:` event and no wildcard or
//!   startup event may never activate its component (warning)
//! - a component activating on `*` is flagged for eager activation (warning)

use crate::analysis::{AnalysisContext, Conflict, ConflictCode, ConflictRule, RuleId, Severity};
use crate::manifest::ComponentManifest;

/// Wildcard activation event.
pub const WILDCARD_EVENT: &str = "*";

/// Startup activation event.
pub const STARTUP_EVENT: &str = "onStartupFinished";

/// Detects commands that are unreachable or may never activate.
pub struct RegistrationMismatchRule {
    builtin_prefixes: Vec<String>,
}

impl RegistrationMismatchRule {
    /// Create the rule, skipping components whose id starts with any of
    /// `builtin_prefixes`.
    pub fn new(builtin_prefixes: Vec<String>) -> Self {
        Self { builtin_prefixes }
    }

    fn is_builtin(&self, manifest: &ComponentManifest) -> bool {
        let id = manifest.id.to_lowercase();
        self.builtin_prefixes
            .iter()
            .any(|prefix| id.starts_with(&prefix.to_lowercase()))
    }
}

impl Default for RegistrationMismatchRule {
    fn default() -> Self {
        Self::new(vec!["vscode.".to_string()])
    }
}

impl ConflictRule for RegistrationMismatchRule {
    fn id(&self) -> RuleId {
        RuleId::new("registration-mismatch")
    }

    fn name(&self) -> &str {
        "Registration Mismatch"
    }

    fn description(&self) -> &str {
        "Detects declared commands that are unregistered or never trigger activation"
    }

    fn check(&self, ctx: &AnalysisContext<'_>) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for manifest in ctx.manifests.iter().filter(|m| !self.is_builtin(m)) {
            let events = &manifest.activation_events;
            let activates_early = events
                .iter()
                .any(|e| e == WILDCARD_EVENT || e == STARTUP_EVENT);

            for command in &manifest.commands {
                let id = &command.command;

                if manifest.is_active && !ctx.registered_commands.contains(id) {
                    conflicts.push(
                        Conflict::new(
                            ConflictCode::GhostCommand,
                            id.as_str(),
                            vec![manifest.display_name.clone()],
                            Severity::Error,
                            format!(
                                "Command '{}' is declared by {} but not registered at runtime",
                                id, manifest.display_name
                            ),
                        )
                        .with_component(&manifest.id),
                    );
                }

                let on_command = format!("onCommand:{}", id);
                if !activates_early && !events.contains(&on_command) {
                    conflicts.push(
                        Conflict::new(
                            ConflictCode::MissingActivationEvent,
                            id.as_str(),
                            vec![manifest.display_name.clone()],
                            Severity::Warning,
                            format!(
                                "Command '{}' has no '{}' activation event; invoking it may not activate {}",
                                id, on_command, manifest.display_name
                            ),
                        )
                        .with_component(&manifest.id),
                    );
                }
            }

            if events.iter().any(|e| e == WILDCARD_EVENT) {
                conflicts.push(
                    Conflict::new(
                        ConflictCode::EagerActivation,
                        WILDCARD_EVENT,
                        vec![manifest.display_name.clone()],
                        Severity::Warning,
                        format!(
                            "{} activates on '*' and loads at every startup",
                            manifest.display_name
                        ),
                    )
                    .with_component(&manifest.id),
                );
            }
        }

        conflicts
    }
}
