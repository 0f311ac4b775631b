//! Activation event overlap detection.
//!
//! Many components waking up on the same event slows that event down. The
//! wildcard and startup-finished events are deliberately shared and never
//! counted here.

use super::OrderedGroups;
use crate::analysis::{AnalysisContext, Conflict, ConflictCode, ConflictRule, RuleId, Severity};

/// Activation events excluded from overlap counting.
pub const IGNORED_ACTIVATION_EVENTS: [&str; 2] = ["*", "onStartupFinished"];

/// Detects activation events shared by too many components.
pub struct ActivationOverlapRule {
    threshold: usize,
}

impl ActivationOverlapRule {
    /// Report events declared by more than `threshold` components.
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl Default for ActivationOverlapRule {
    fn default() -> Self {
        Self::new(2)
    }
}

impl ConflictRule for ActivationOverlapRule {
    fn id(&self) -> RuleId {
        RuleId::new("activation-overlap")
    }

    fn name(&self) -> &str {
        "Activation Overlap"
    }

    fn description(&self) -> &str {
        "Detects activation events declared by many components"
    }

    fn check(&self, ctx: &AnalysisContext<'_>) -> Vec<Conflict> {
        // event -> [(component id, display name)]
        let mut owners: OrderedGroups<(&str, &str)> = OrderedGroups::new();

        for manifest in ctx.manifests {
            for event in &manifest.activation_events {
                if IGNORED_ACTIVATION_EVENTS.contains(&event.as_str()) {
                    continue;
                }
                let group = owners.entry(event);
                if !group.iter().any(|(id, _)| *id == manifest.id) {
                    group.push((manifest.id.as_str(), manifest.display_name.as_str()));
                }
            }
        }

        owners
            .into_groups()
            .filter(|(_, group)| group.len() > self.threshold)
            .map(|(event, group)| {
                let sources: Vec<String> = group.iter().map(|(_, name)| name.to_string()).collect();
                let description = format!(
                    "Activation event '{}' is declared by {} components",
                    event,
                    sources.len()
                );
                Conflict::new(
                    ConflictCode::ActivationOverlap,
                    event,
                    sources,
                    Severity::Warning,
                    description,
                )
            })
            .collect()
    }
}
