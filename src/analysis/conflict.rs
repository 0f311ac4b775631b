//! Conflict records.
//!
//! Conflicts are recomputed on every analysis run and never mutated after
//! a rule emits them.

use serde::{Deserialize, Serialize};

/// Severity of a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Likely to cause surprising behavior.
    Warning,
    /// Something is broken.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Broad category of a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
    Command,
    Keybinding,
    Activation,
    Registration,
}

impl std::fmt::Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConflictType::Command => "command",
            ConflictType::Keybinding => "keybinding",
            ConflictType::Activation => "activation",
            ConflictType::Registration => "registration",
        };
        f.write_str(name)
    }
}

/// The specific finding behind a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictCode {
    /// Several components contribute the same command id.
    CommandCollision,
    /// Several keybindings normalize to the same key.
    KeybindingCollision,
    /// Too many components share an activation event.
    ActivationOverlap,
    /// Declared command missing from the runtime command table.
    GhostCommand,
    /// Declared command that no activation event covers.
    MissingActivationEvent,
    /// Component activates on the wildcard event.
    EagerActivation,
}

impl ConflictCode {
    /// Stable kebab-case tag, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            ConflictCode::CommandCollision => "command-collision",
            ConflictCode::KeybindingCollision => "keybinding-collision",
            ConflictCode::ActivationOverlap => "activation-overlap",
            ConflictCode::GhostCommand => "ghost-command",
            ConflictCode::MissingActivationEvent => "missing-activation-event",
            ConflictCode::EagerActivation => "eager-activation",
        }
    }

    /// Category this finding belongs to.
    pub fn conflict_type(self) -> ConflictType {
        match self {
            ConflictCode::CommandCollision => ConflictType::Command,
            ConflictCode::KeybindingCollision => ConflictType::Keybinding,
            ConflictCode::ActivationOverlap | ConflictCode::EagerActivation => {
                ConflictType::Activation
            }
            ConflictCode::GhostCommand | ConflictCode::MissingActivationEvent => {
                ConflictType::Registration
            }
        }
    }
}

impl std::fmt::Display for ConflictCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    #[serde(rename = "type")]
    pub kind: ConflictType,
    pub code: ConflictCode,
    /// The colliding or offending identifier.
    pub id: String,
    /// Contributing components, in manifest order. Never empty.
    pub sources: Vec<String>,
    pub severity: Severity,
    pub description: String,
    /// Owning component, for findings about a single component.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

impl Conflict {
    /// Create a conflict; the type follows from the code.
    pub fn new(
        code: ConflictCode,
        id: impl Into<String>,
        sources: Vec<String>,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        debug_assert!(!sources.is_empty(), "conflict sources must not be empty");
        Self {
            kind: code.conflict_type(),
            code,
            id: id.into(),
            sources,
            severity,
            description: description.into(),
            component_id: None,
        }
    }

    /// Attach the owning component.
    pub fn with_component(mut self, component_id: impl Into<String>) -> Self {
        self.component_id = Some(component_id.into());
        self
    }
}

/// Severity counts over one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl AnalysisSummary {
    /// Count severities.
    pub fn from_conflicts(conflicts: &[Conflict]) -> Self {
        conflicts
            .iter()
            .fold(Self::default(), |mut acc, c| {
                match c.severity {
                    Severity::Error => acc.errors += 1,
                    Severity::Warning => acc.warnings += 1,
                }
                acc
            })
    }

    /// Total number of conflicts.
    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }

    /// Whether any error-severity conflict was found.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}
