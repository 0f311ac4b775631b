//! Detector rule definitions.
//!
//! This module provides the core types for defining detector rules:
//!
//! - [`ConflictRule`] - The trait that all detector rules implement
//! - [`RuleId`] - Unique identifier for a rule
//! - [`AnalysisContext`] - The immutable inputs every rule reads

use std::collections::HashSet;

use super::conflict::Conflict;
use crate::manifest::ComponentManifest;

/// Unique identifier for a detector rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inputs shared by every rule in one analysis run.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    /// Manifest snapshot, in registry order.
    pub manifests: &'a [ComponentManifest],
    /// Command ids registered with the host at analysis time.
    pub registered_commands: &'a HashSet<String>,
}

/// A detector that inspects one snapshot and reports conflicts.
///
/// Rules are pure: the same context always yields the same conflicts, and
/// no rule sees another rule's output.
pub trait ConflictRule: Send + Sync {
    /// Unique identifier for this rule.
    fn id(&self) -> RuleId;

    /// Human-readable name of the rule.
    fn name(&self) -> &str;

    /// Description of what this rule checks.
    fn description(&self) -> &str;

    /// Inspect the snapshot and return any conflicts.
    fn check(&self, ctx: &AnalysisContext<'_>) -> Vec<Conflict>;
}
