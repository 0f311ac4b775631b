//! Host collaborator capabilities.
//!
//! The diagnostics engine never talks to the host application directly.
//! Everything it needs from the outside world arrives through the traits
//! in this module, injected at construction:
//!
//! - [`ExtensionRegistry`] - installed component descriptors
//! - [`CommandTable`] - live set of registered command ids
//! - [`FileEditor`] - document reads and transactional whole-document edits
//! - [`Clipboard`] - write a string for the user to paste
//! - [`SlowOperationHook`] - optional notification for slow operations
//!
//! Two families of implementations ship with the crate: in-memory fakes in
//! [`memory`] and filesystem-backed adapters in [`fs`] used by the CLI.

pub mod fs;
pub mod hook;
pub mod memory;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use hook::{SlowOperationHook, TracingSlowOperationHook};

/// Errors produced by host collaborators.
#[derive(Debug, Error)]
pub enum HostError {
    /// The requested item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Underlying I/O failure.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The collaborator refused the request.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The collaborator cannot serve requests right now.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// One installed component as reported by the registry.
///
/// `package_json` is the raw manifest subtree; turning it into a typed
/// [`ComponentManifest`](crate::manifest::ComponentManifest) is the
/// collector's job.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDescriptor {
    /// Fully qualified component id (`publisher.name`).
    pub id: String,
    /// Human-readable name, if the manifest declares one.
    pub display_name: Option<String>,
    /// Publisher identifier.
    pub publisher: String,
    /// Declared version string.
    pub version: String,
    /// Whether the host currently has the component activated.
    pub is_active: bool,
    /// Location of the manifest document, used for remediation edits.
    pub manifest_location: PathBuf,
    /// Parsed manifest.
    pub package_json: Value,
}

impl ComponentDescriptor {
    /// Create an active descriptor, reading display fields from the manifest.
    pub fn new(id: impl Into<String>, package_json: Value) -> Self {
        let id = id.into();
        let text = |key: &str| package_json.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            display_name: text("displayName"),
            publisher: text("publisher").unwrap_or_default(),
            version: text("version").unwrap_or_default(),
            is_active: true,
            manifest_location: PathBuf::from(&id).join("package.json"),
            id,
            package_json,
        }
    }

    /// Set the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Set where the manifest document lives.
    pub fn with_manifest_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.manifest_location = location.into();
        self
    }
}

/// A whole-document replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEdit {
    /// Document to replace.
    pub location: PathBuf,
    /// Full new contents.
    pub new_text: String,
}

/// Read-only view of installed components.
#[async_trait]
pub trait ExtensionRegistry: Send + Sync {
    /// List every installed component, in registry order.
    async fn list(&self) -> Result<Vec<ComponentDescriptor>, HostError>;

    /// Look up a single component by id.
    async fn get(&self, id: &str) -> Result<Option<ComponentDescriptor>, HostError> {
        Ok(self.list().await?.into_iter().find(|c| c.id == id))
    }
}

/// Live set of command ids registered with the host.
#[async_trait]
pub trait CommandTable: Send + Sync {
    /// Fetch the currently registered command ids.
    async fn registered_commands(&self) -> Result<HashSet<String>, HostError>;
}

/// Document access for remediation.
#[async_trait]
pub trait FileEditor: Send + Sync {
    /// Read a text document.
    async fn read_text(&self, location: &Path) -> Result<String, HostError>;

    /// Apply all edits as one transaction.
    ///
    /// Implementations are expected to be all-or-nothing; callers perform no
    /// rollback of their own.
    async fn apply(&self, edits: &[DocumentEdit]) -> Result<(), HostError>;
}

/// System clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents.
    async fn write_text(&self, text: &str) -> Result<(), HostError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn descriptor_reads_display_fields() {
        let desc = ComponentDescriptor::new(
            "acme.tools",
            json!({"displayName": "Acme Tools", "publisher": "acme", "version": "1.2.3"}),
        );
        assert_eq!(desc.display_name.as_deref(), Some("Acme Tools"));
        assert_eq!(desc.publisher, "acme");
        assert_eq!(desc.version, "1.2.3");
        assert!(desc.is_active);
        assert_eq!(desc.manifest_location, PathBuf::from("acme.tools/package.json"));
    }

    #[test]
    fn descriptor_tolerates_missing_fields() {
        let desc = ComponentDescriptor::new("x.y", json!({})).with_active(false);
        assert!(desc.display_name.is_none());
        assert!(desc.publisher.is_empty());
        assert!(!desc.is_active);
    }

    #[test]
    fn host_error_display() {
        assert_eq!(HostError::NotFound("a".into()).to_string(), "not found: a");
        assert_eq!(HostError::Rejected("b".into()).to_string(), "rejected: b");
    }
}
