//! Conflict analysis.
//!
//! This module detects misconfiguration across installed components
//! through a pluggable rule-based system.
//!
//! # Overview
//!
//! The analysis system consists of:
//!
//! - **Rules** - Independent detectors ([`ConflictRule`] trait)
//! - **Registry** - Ordered collection of rules ([`RuleRegistry`])
//! - **Conflicts** - Findings with severity and sources ([`Conflict`])
//! - **Analyzer** - Collects a snapshot, queries the command table and
//!   merges rule output ([`ConflictAnalyzer`])
//!
//! # Example
//!
//! ```
//! use extdoctor::analysis::{normalize_keybinding, RuleId, RuleRegistry, Severity};
//! use extdoctor::config::AnalysisSettings;
//!
//! let registry = RuleRegistry::with_builtins(&AnalysisSettings::default());
//! assert!(registry.get(&RuleId::new("command-collision")).is_some());
//!
//! assert_eq!(normalize_keybinding("Control+Shift+ K"), "ctrl+shift+k");
//! assert!(Severity::Warning < Severity::Error);
//! ```

pub mod analyzer;
pub mod cache;
pub mod conflict;
pub mod keybinding;
pub mod registry;
pub mod rule;
pub mod rules;

pub use analyzer::ConflictAnalyzer;
pub use cache::CommandCache;
pub use conflict::{AnalysisSummary, Conflict, ConflictCode, ConflictType, Severity};
pub use keybinding::normalize_keybinding;
pub use registry::RuleRegistry;
pub use rule::{AnalysisContext, ConflictRule, RuleId};
pub use rules::{
    ActivationOverlapRule, CommandCollisionRule, KeybindingCollisionRule,
    RegistrationMismatchRule,
};
