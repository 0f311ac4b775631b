//! In-memory collaborators.
//!
//! These back the engine in tests and in embedders that already hold host
//! state in memory. Each one records enough about its use (fetch counts,
//! apply calls) for assertions.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    Clipboard, CommandTable, ComponentDescriptor, DocumentEdit, ExtensionRegistry, FileEditor,
    HostError,
};

/// Registry over a fixed, mutable list of descriptors.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    components: RwLock<Vec<ComponentDescriptor>>,
}

impl InMemoryRegistry {
    /// Create a registry holding `components` in order.
    pub fn new(components: Vec<ComponentDescriptor>) -> Self {
        Self {
            components: RwLock::new(components),
        }
    }

    /// Add or replace a component (matched by id).
    pub async fn upsert(&self, component: ComponentDescriptor) {
        let mut components = self.components.write().await;
        match components.iter_mut().find(|c| c.id == component.id) {
            Some(existing) => *existing = component,
            None => components.push(component),
        }
    }

    /// Remove a component, returning whether it was present.
    pub async fn remove(&self, id: &str) -> bool {
        let mut components = self.components.write().await;
        let before = components.len();
        components.retain(|c| c.id != id);
        components.len() != before
    }
}

#[async_trait]
impl ExtensionRegistry for InMemoryRegistry {
    async fn list(&self) -> Result<Vec<ComponentDescriptor>, HostError> {
        Ok(self.components.read().await.clone())
    }
}

/// Command table over a mutable set, counting fetches.
#[derive(Debug, Default)]
pub struct InMemoryCommandTable {
    commands: RwLock<HashSet<String>>,
    fetches: AtomicUsize,
}

impl InMemoryCommandTable {
    /// Create a table with the given registered commands.
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: RwLock::new(commands.into_iter().map(Into::into).collect()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Register another command.
    pub async fn register(&self, command: impl Into<String>) {
        self.commands.write().await.insert(command.into());
    }

    /// Number of times the table has been queried.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CommandTable for InMemoryCommandTable {
    async fn registered_commands(&self) -> Result<HashSet<String>, HostError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.commands.read().await.clone())
    }
}

/// Document store with transactional apply.
#[derive(Debug, Default)]
pub struct InMemoryFileEditor {
    documents: RwLock<HashMap<PathBuf, String>>,
    apply_calls: AtomicUsize,
    reject_applies: AtomicBool,
}

impl InMemoryFileEditor {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a document.
    pub async fn insert(&self, location: impl Into<PathBuf>, text: impl Into<String>) {
        self.documents
            .write()
            .await
            .insert(location.into(), text.into());
    }

    /// Current contents of a document.
    pub async fn document(&self, location: &Path) -> Option<String> {
        self.documents.read().await.get(location).cloned()
    }

    /// Number of `apply` calls received, successful or not.
    pub fn apply_count(&self) -> usize {
        self.apply_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent `apply` calls fail without touching any document.
    pub fn set_reject_applies(&self, reject: bool) {
        self.reject_applies.store(reject, Ordering::SeqCst);
    }
}

#[async_trait]
impl FileEditor for InMemoryFileEditor {
    async fn read_text(&self, location: &Path) -> Result<String, HostError> {
        self.document(location)
            .await
            .ok_or_else(|| HostError::NotFound(location.display().to_string()))
    }

    async fn apply(&self, edits: &[DocumentEdit]) -> Result<(), HostError> {
        self.apply_calls.fetch_add(1, Ordering::SeqCst);
        if self.reject_applies.load(Ordering::SeqCst) {
            return Err(HostError::Rejected("edit transaction refused".into()));
        }

        let mut documents = self.documents.write().await;
        if let Some(missing) = edits.iter().find(|e| !documents.contains_key(&e.location)) {
            return Err(HostError::NotFound(missing.location.display().to_string()));
        }
        for edit in edits {
            documents.insert(edit.location.clone(), edit.new_text.clone());
        }
        Ok(())
    }
}

/// Clipboard that keeps the last written text.
#[derive(Debug, Default)]
pub struct InMemoryClipboard {
    contents: RwLock<Option<String>>,
    unavailable: AtomicBool,
}

impl InMemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written text.
    pub async fn contents(&self) -> Option<String> {
        self.contents.read().await.clone()
    }

    /// Make subsequent writes fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl Clipboard for InMemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<(), HostError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(HostError::Unavailable("clipboard is not available".into()));
        }
        *self.contents.write().await = Some(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn registry_upsert_and_remove() {
        let registry = InMemoryRegistry::new(vec![ComponentDescriptor::new("a.one", json!({}))]);
        registry
            .upsert(ComponentDescriptor::new("a.one", json!({"version": "2.0.0"})))
            .await;
        registry
            .upsert(ComponentDescriptor::new("b.two", json!({})))
            .await;

        let listed = registry.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].version, "2.0.0");

        assert!(registry.remove("a.one").await);
        assert!(!registry.remove("a.one").await);
        assert!(registry.get("a.one").await.unwrap().is_none());
        assert!(registry.get("b.two").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn command_table_counts_fetches() {
        let table = InMemoryCommandTable::new(["a.run"]);
        table.register("b.run").await;
        let commands = table.registered_commands().await.unwrap();
        assert!(commands.contains("a.run"));
        assert!(commands.contains("b.run"));
        assert_eq!(table.fetch_count(), 1);
    }

    #[tokio::test]
    async fn file_editor_apply_is_all_or_nothing() {
        let editor = InMemoryFileEditor::new();
        editor.insert("/a.json", "{}").await;

        let edits = vec![
            DocumentEdit {
                location: PathBuf::from("/a.json"),
                new_text: "{\"x\":1}".into(),
            },
            DocumentEdit {
                location: PathBuf::from("/missing.json"),
                new_text: "{}".into(),
            },
        ];
        assert!(editor.apply(&edits).await.is_err());
        assert_eq!(editor.document(Path::new("/a.json")).await.unwrap(), "{}");
        assert_eq!(editor.apply_count(), 1);
    }

    #[tokio::test]
    async fn file_editor_rejects_when_told() {
        let editor = InMemoryFileEditor::new();
        editor.insert("/a.json", "{}").await;
        editor.set_reject_applies(true);

        let edit = DocumentEdit {
            location: PathBuf::from("/a.json"),
            new_text: "[]".into(),
        };
        let err = editor.apply(&[edit]).await.unwrap_err();
        assert!(matches!(err, HostError::Rejected(_)));
        assert_eq!(editor.document(Path::new("/a.json")).await.unwrap(), "{}");
    }

    #[tokio::test]
    async fn clipboard_round_trip_and_failure() {
        let clipboard = InMemoryClipboard::new();
        clipboard.write_text("hello").await.unwrap();
        assert_eq!(clipboard.contents().await.as_deref(), Some("hello"));

        clipboard.set_unavailable(true);
        assert!(clipboard.write_text("again").await.is_err());
        assert_eq!(clipboard.contents().await.as_deref(), Some("hello"));
    }
}
