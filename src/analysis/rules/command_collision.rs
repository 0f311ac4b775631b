//! Command id collision detection.
//!
//! This rule detects command ids contributed by more than one component.

use super::OrderedGroups;
use crate::analysis::{AnalysisContext, Conflict, ConflictCode, ConflictRule, RuleId, Severity};

/// Detects command ids claimed by several components.
pub struct CommandCollisionRule {
    severity: Severity,
}

impl CommandCollisionRule {
    /// Create the rule, reporting collisions at `severity`.
    pub fn new(severity: Severity) -> Self {
        Self { severity }
    }
}

impl Default for CommandCollisionRule {
    fn default() -> Self {
        Self::new(Severity::Error)
    }
}

impl ConflictRule for CommandCollisionRule {
    fn id(&self) -> RuleId {
        RuleId::new("command-collision")
    }

    fn name(&self) -> &str {
        "Command Collision"
    }

    fn description(&self) -> &str {
        "Detects command ids contributed by more than one component"
    }

    fn check(&self, ctx: &AnalysisContext<'_>) -> Vec<Conflict> {
        // command id -> [(component id, display name)]
        let mut owners: OrderedGroups<(&str, &str)> = OrderedGroups::new();

        for manifest in ctx.manifests {
            for command in &manifest.commands {
                let group = owners.entry(&command.command);
                if !group.iter().any(|(id, _)| *id == manifest.id) {
                    group.push((manifest.id.as_str(), manifest.display_name.as_str()));
                }
            }
        }

        owners
            .into_groups()
            .filter(|(_, group)| group.len() > 1)
            .map(|(command, group)| {
                let sources: Vec<String> = group.iter().map(|(_, name)| name.to_string()).collect();
                let description = format!(
                    "Command '{}' is contributed by {} components: {}",
                    command,
                    sources.len(),
                    sources.join(", ")
                );
                Conflict::new(
                    ConflictCode::CommandCollision,
                    command,
                    sources,
                    self.severity,
                    description,
                )
            })
            .collect()
    }
}
