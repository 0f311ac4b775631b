//! Keybinding collision detection.
//!
//! This rule groups contributed keybindings by their normalized
//! representative key and reports every key bound more than once.

use super::OrderedGroups;
use crate::analysis::{
    normalize_keybinding, AnalysisContext, Conflict, ConflictCode, ConflictRule, RuleId, Severity,
};

/// Detects keys bound by more than one contribution.
pub struct KeybindingCollisionRule;

impl ConflictRule for KeybindingCollisionRule {
    fn id(&self) -> RuleId {
        RuleId::new("keybinding-collision")
    }

    fn name(&self) -> &str {
        "Keybinding Collision"
    }

    fn description(&self) -> &str {
        "Detects key combinations bound by more than one contribution"
    }

    fn check(&self, ctx: &AnalysisContext<'_>) -> Vec<Conflict> {
        let mut bindings: OrderedGroups<String> = OrderedGroups::new();

        for manifest in ctx.manifests {
            for binding in &manifest.keybindings {
                let Some(key) = binding.representative_key() else {
                    continue;
                };
                bindings
                    .entry(&normalize_keybinding(key))
                    .push(format!("{} ({})", manifest.display_name, binding.command));
            }
        }

        bindings
            .into_groups()
            .filter(|(_, sources)| sources.len() > 1)
            .map(|(key, sources)| {
                let description = format!(
                    "Key '{}' is bound {} times: {}",
                    key,
                    sources.len(),
                    sources.join(", ")
                );
                Conflict::new(
                    ConflictCode::KeybindingCollision,
                    key,
                    sources,
                    Severity::Warning,
                    description,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::rules::fixtures::{manifest, with_key};
    use crate::manifest::{ComponentManifest, KeybindingContribution};
    use std::collections::HashSet;

    fn check(manifests: &[ComponentManifest]) -> Vec<Conflict> {
        let commands = HashSet::new();
        KeybindingCollisionRule.check(&AnalysisContext {
            manifests,
            registered_commands: &commands,
        })
    }

    #[test]
    fn detects_collision_across_aliases() {
        let manifests = vec![
            with_key(manifest("a.one"), "Control+Shift+K", "a.kill"),
            with_key(manifest("b.two"), "ctrl + shift + k", "b.keep"),
        ];

        let conflicts = check(&manifests);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, "ctrl+shift+k");
        assert_eq!(conflicts[0].severity, Severity::Warning);
        assert_eq!(conflicts[0].sources, vec!["A.ONE (a.kill)", "B.TWO (b.keep)"]);
    }

    #[test]
    fn passes_with_distinct_keys() {
        let manifests = vec![
            with_key(manifest("a.one"), "ctrl+k", "a.kill"),
            with_key(manifest("b.two"), "ctrl+j", "b.join"),
        ];
        assert!(check(&manifests).is_empty());
    }

    #[test]
    fn uses_representative_variant() {
        let mut mac_only = manifest("a.one");
        mac_only.keybindings.push(KeybindingContribution {
            mac: Some("cmd+p".into()),
            command: "a.palette".into(),
            ..Default::default()
        });
        let manifests = vec![mac_only, with_key(manifest("b.two"), "Command+P", "b.print")];

        let conflicts = check(&manifests);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].id, "cmd+p");
    }

    #[test]
    fn bindings_without_keys_are_ignored() {
        let mut keyless = manifest("a.one");
        keyless.keybindings.push(KeybindingContribution {
            command: "a.none".into(),
            ..Default::default()
        });
        let mut keyless_too = manifest("b.two");
        keyless_too.keybindings.push(KeybindingContribution {
            command: "b.none".into(),
            ..Default::default()
        });
        assert!(check(&[keyless, keyless_too]).is_empty());
    }

    #[test]
    fn one_conflict_per_key_group() {
        let manifests = vec![
            with_key(with_key(manifest("a.one"), "f5", "a.run"), "f6", "a.step"),
            with_key(with_key(manifest("b.two"), "F5", "b.run"), "F6", "b.step"),
            with_key(manifest("c.three"), "f5", "c.run"),
        ];

        let conflicts = check(&manifests);
        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].id, "f5");
        assert_eq!(conflicts[0].sources.len(), 3);
        assert_eq!(conflicts[1].id, "f6");
        assert_eq!(conflicts[1].sources.len(), 2);
    }
}
