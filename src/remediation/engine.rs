//! Batch and single-conflict remediation.

use std::sync::Arc;

use crate::analysis::{Conflict, ConflictCode};
use crate::analysis::rules::OrderedGroups;
use crate::error::DoctorError;
use crate::host::{Clipboard, DocumentEdit, ExtensionRegistry, FileEditor};

use super::patch::add_activation_events;
use super::{ComponentFailure, RemediationOutcome, RemediationPolicy};

/// Turns missing-activation conflicts into manifest edits.
pub struct RemediationEngine {
    registry: Arc<dyn ExtensionRegistry>,
    files: Arc<dyn FileEditor>,
    clipboard: Arc<dyn Clipboard>,
    policy: RemediationPolicy,
}

impl RemediationEngine {
    /// Create an engine over the given collaborators.
    pub fn new(
        registry: Arc<dyn ExtensionRegistry>,
        files: Arc<dyn FileEditor>,
        clipboard: Arc<dyn Clipboard>,
        policy: RemediationPolicy,
    ) -> Self {
        Self {
            registry,
            files,
            clipboard,
            policy,
        }
    }

    /// The active policy.
    pub fn policy(&self) -> RemediationPolicy {
        self.policy
    }

    /// Patch every component named by a missing-activation conflict.
    ///
    /// Other conflict codes are ignored. A manifest that fails to read or
    /// parse is reported in `failures` and the rest of the batch continues;
    /// a component no longer in the registry is skipped.
    pub async fn remediate_batch(&self, conflicts: &[Conflict]) -> RemediationOutcome {
        let mut groups: OrderedGroups<String> = OrderedGroups::new();
        for conflict in conflicts {
            if conflict.code != ConflictCode::MissingActivationEvent {
                continue;
            }
            if let Some(component_id) = &conflict.component_id {
                groups.entry(component_id).push(conflict.id.clone());
            }
        }

        let mut edits = Vec::new();
        let mut failures = Vec::new();

        for (component_id, command_ids) in groups.into_groups() {
            let descriptor = match self.registry.get(&component_id).await {
                Ok(Some(descriptor)) => descriptor,
                Ok(None) => {
                    tracing::debug!(component = %component_id, "component vanished, skipping");
                    continue;
                }
                Err(e) => {
                    failures.push(failure(&component_id, DoctorError::host("registry lookup", e)));
                    continue;
                }
            };

            let text = match self.files.read_text(&descriptor.manifest_location).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(component = %component_id, "cannot read manifest: {}", e);
                    failures.push(failure(&component_id, DoctorError::host("manifest read", e)));
                    continue;
                }
            };

            match add_activation_events(&text, &command_ids) {
                Ok(Some(new_text)) => edits.push(DocumentEdit {
                    location: descriptor.manifest_location,
                    new_text,
                }),
                Ok(None) => {
                    tracing::debug!(component = %component_id, "activation events already present");
                }
                Err(e) => {
                    tracing::warn!(component = %component_id, "cannot patch manifest: {}", e);
                    let error = DoctorError::ManifestParse {
                        component: component_id.clone(),
                        message: e.to_string(),
                    };
                    failures.push(failure(&component_id, error));
                }
            }
        }

        let mut outcome = if edits.is_empty() {
            RemediationOutcome::new(true, "No manifest changes needed")
        } else if !self.policy.auto_apply {
            let mut outcome = RemediationOutcome::new(
                true,
                format!("{} manifest edit(s) planned; auto-apply is off", edits.len()),
            );
            outcome.edits = edits;
            outcome
        } else {
            match self.files.apply(&edits).await {
                Ok(()) => {
                    tracing::info!(documents = edits.len(), "applied manifest edits");
                    let mut outcome = RemediationOutcome::new(
                        true,
                        format!("Updated {} manifest(s)", edits.len()),
                    );
                    outcome.edits = edits;
                    outcome.applied = true;
                    outcome
                }
                Err(e) => {
                    let mut outcome =
                        RemediationOutcome::new(false, format!("Applying manifest edits failed: {}", e));
                    outcome.edits = edits;
                    outcome
                }
            }
        };
        outcome.failures = failures;
        outcome
    }

    /// Copy the fix for one conflict to the clipboard. Never writes files.
    pub async fn remediate_single(&self, conflict: &Conflict) -> RemediationOutcome {
        if conflict.code != ConflictCode::MissingActivationEvent {
            return RemediationOutcome::new(
                false,
                format!("No manual remediation is available for {} conflicts", conflict.kind),
            );
        }

        let text = format!("\"onCommand:{}\"", conflict.id);
        let owner = conflict
            .component_id
            .as_deref()
            .unwrap_or_else(|| conflict.sources.first().map(String::as_str).unwrap_or("the component"));

        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                let mut outcome = RemediationOutcome::new(
                    true,
                    format!(
                        "Copied {} to the clipboard; add it to the activationEvents of {}",
                        text, owner
                    ),
                );
                outcome.clipboard_text = Some(text);
                outcome
            }
            Err(e) => RemediationOutcome::new(false, format!("Clipboard write failed: {}", e)),
        }
    }
}

fn failure(component_id: &str, error: DoctorError) -> ComponentFailure {
    ComponentFailure {
        component_id: component_id.to_string(),
        message: error.to_string(),
    }
}
