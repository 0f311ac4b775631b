//! Rule registry for managing detector rules.
//!
//! The [`RuleRegistry`] keeps rules in registration order; merged output
//! follows that order.

use super::conflict::{Conflict, Severity};
use super::rule::{AnalysisContext, ConflictRule, RuleId};
use super::rules::{
    ActivationOverlapRule, CommandCollisionRule, KeybindingCollisionRule,
    RegistrationMismatchRule,
};
use crate::config::AnalysisSettings;

/// Ordered collection of detector rules.
pub struct RuleRegistry {
    rules: Vec<Box<dyn ConflictRule>>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a registry with the four built-in detectors, configured from
    /// `settings`, in their canonical order.
    pub fn with_builtins(settings: &AnalysisSettings) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(CommandCollisionRule::new(
            settings.command_collision_severity,
        )));
        registry.register(Box::new(KeybindingCollisionRule));
        registry.register(Box::new(ActivationOverlapRule::new(
            settings.activation_overlap_threshold,
        )));
        registry.register(Box::new(RegistrationMismatchRule::new(
            settings.builtin_prefixes.clone(),
        )));
        registry
    }

    /// Register a rule, replacing any rule with the same id in place.
    pub fn register(&mut self, rule: Box<dyn ConflictRule>) {
        let id = rule.id();
        match self.rules.iter().position(|r| r.id() == id) {
            Some(index) => self.rules[index] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &RuleId) -> Option<&dyn ConflictRule> {
        self.rules
            .iter()
            .find(|r| &r.id() == id)
            .map(|r| r.as_ref())
    }

    /// Iterate over all rules in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ConflictRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule and concatenate their output in rule order.
    ///
    /// No de-duplication happens here; the same id may be reported by
    /// several rules.
    pub fn run(&self, ctx: &AnalysisContext<'_>) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for rule in self.iter() {
            let found = rule.check(ctx);
            tracing::debug!(
                rule = %rule.id(),
                conflicts = found.len(),
                errors = found.iter().filter(|c| c.severity == Severity::Error).count(),
                "rule finished"
            );
            conflicts.extend(found);
        }
        conflicts
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ConflictCode;
    use std::collections::HashSet;

    struct MockRule {
        id: RuleId,
        emits: usize,
    }

    impl ConflictRule for MockRule {
        fn id(&self) -> RuleId {
            self.id.clone()
        }
        fn name(&self) -> &str {
            "Mock Rule"
        }
        fn description(&self) -> &str {
            "A mock rule for testing"
        }
        fn check(&self, _ctx: &AnalysisContext<'_>) -> Vec<Conflict> {
            (0..self.emits)
                .map(|i| {
                    Conflict::new(
                        ConflictCode::CommandCollision,
                        format!("{}-{}", self.id, i),
                        vec!["mock".into()],
                        Severity::Warning,
                        "mock",
                    )
                })
                .collect()
        }
    }

    fn mock(id: &str, emits: usize) -> Box<dyn ConflictRule> {
        Box::new(MockRule {
            id: RuleId::new(id),
            emits,
        })
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register_and_get() {
        let mut registry = RuleRegistry::new();
        registry.register(mock("mock", 0));

        assert!(!registry.is_empty());
        assert!(registry.get(&RuleId::new("mock")).is_some());
        assert!(registry.get(&RuleId::new("unknown")).is_none());
    }

    #[test]
    fn registering_same_id_replaces_in_place() {
        let mut registry = RuleRegistry::new();
        registry.register(mock("first", 1));
        registry.register(mock("second", 1));
        registry.register(mock("first", 3));

        assert_eq!(registry.len(), 2);
        let ids: Vec<_> = registry.iter().map(|r| r.id().0).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[test]
    fn run_preserves_rule_order() {
        let mut registry = RuleRegistry::new();
        registry.register(mock("b", 2));
        registry.register(mock("a", 1));

        let commands = HashSet::new();
        let ctx = AnalysisContext {
            manifests: &[],
            registered_commands: &commands,
        };
        let ids: Vec<_> = registry.run(&ctx).into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["b-0", "b-1", "a-0"]);
    }

    #[test]
    fn builtins_are_registered_in_canonical_order() {
        let registry = RuleRegistry::with_builtins(&AnalysisSettings::default());
        let ids: Vec<_> = registry.iter().map(|r| r.id().0).collect();
        assert_eq!(
            ids,
            vec![
                "command-collision",
                "keybinding-collision",
                "activation-overlap",
                "registration-mismatch"
            ]
        );
    }
}
