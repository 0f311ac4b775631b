//! Remediation of missing activation declarations.
//!
//! Two paths exist and they deliberately behave differently:
//!
//! - **Batch** ([`RemediationEngine::remediate_batch`]) groups
//!   missing-activation conflicts by component, patches each manifest and
//!   submits every edit in one transaction. Whether it writes is governed
//!   by [`RemediationPolicy::auto_apply`]; with auto-apply off it only
//!   returns the planned edits.
//! - **Single** ([`RemediationEngine::remediate_single`]) never writes. It
//!   copies the text the user needs to add to the clipboard.

pub mod engine;
pub mod patch;

pub use engine::RemediationEngine;
pub use patch::{add_activation_events, detect_indent, PatchError};

use serde::Serialize;

use crate::config::RemediationSettings;
use crate::host::DocumentEdit;

/// Whether batch remediation may write manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemediationPolicy {
    pub auto_apply: bool,
}

impl Default for RemediationPolicy {
    fn default() -> Self {
        Self { auto_apply: true }
    }
}

impl From<&RemediationSettings> for RemediationPolicy {
    fn from(settings: &RemediationSettings) -> Self {
        Self {
            auto_apply: settings.auto_apply,
        }
    }
}

/// A component whose manifest could not be patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFailure {
    pub component_id: String,
    pub message: String,
}

/// Result of a remediation request.
///
/// `success` reflects the collaborator calls (edit transaction, clipboard);
/// per-component patch failures are listed in `failures` without flipping
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationOutcome {
    pub success: bool,
    pub message: String,
    /// Edits computed by the batch path.
    pub edits: Vec<DocumentEdit>,
    /// Whether `edits` were submitted to the file editor.
    pub applied: bool,
    pub failures: Vec<ComponentFailure>,
    /// Text placed on the clipboard by the single path.
    pub clipboard_text: Option<String>,
}

impl RemediationOutcome {
    fn new(success: bool, message: impl Into<String>) -> Self {
        Self {
            success,
            message: message.into(),
            edits: Vec::new(),
            applied: false,
            failures: Vec::new(),
            clipboard_text: None,
        }
    }

    /// Number of documents written.
    pub fn applied_count(&self) -> usize {
        if self.applied {
            self.edits.len()
        } else {
            0
        }
    }
}
