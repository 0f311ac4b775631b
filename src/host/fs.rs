//! Filesystem-backed collaborators for the CLI.
//!
//! An extensions directory holds one sub-directory per installed component,
//! each with a `package.json` manifest. The runtime command table cannot be
//! observed from outside the host, so it is read from a file or
//! approximated from declared commands.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use super::{
    Clipboard, CommandTable, ComponentDescriptor, DocumentEdit, ExtensionRegistry, FileEditor,
    HostError,
};
use crate::manifest::ComponentManifest;

const MANIFEST_FILE: &str = "package.json";

/// Registry that scans `<root>/*/package.json`.
#[derive(Debug, Clone)]
pub struct FsExtensionRegistry {
    root: PathBuf,
    inactive: HashSet<String>,
}

impl FsExtensionRegistry {
    /// Create a registry rooted at an extensions directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            inactive: HashSet::new(),
        }
    }

    /// Treat these component ids as installed but not active.
    pub fn with_inactive<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inactive = ids.into_iter().map(Into::into).collect();
        self
    }

    /// The extensions directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_component(&self, dir: &Path) -> Option<ComponentDescriptor> {
        let location = dir.join(MANIFEST_FILE);
        let text = fs::read_to_string(&location).await.ok()?;
        let package_json: Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", location.display(), e);
                return None;
            }
        };

        let name = package_json.get("name").and_then(Value::as_str)?;
        let id = match package_json.get("publisher").and_then(Value::as_str) {
            Some(publisher) => format!("{}.{}", publisher, name),
            None => name.to_string(),
        };
        let is_active = !self.inactive.contains(&id);

        Some(
            ComponentDescriptor::new(id, package_json)
                .with_active(is_active)
                .with_manifest_location(location),
        )
    }
}

#[async_trait]
impl ExtensionRegistry for FsExtensionRegistry {
    async fn list(&self) -> Result<Vec<ComponentDescriptor>, HostError> {
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => HostError::NotFound(self.root.display().to_string()),
            _ => HostError::Io(e),
        })?;

        let mut dirs: Vec<(OsString, PathBuf)> = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                dirs.push((entry.file_name(), entry.path()));
            }
        }
        dirs.sort();

        let mut components = Vec::with_capacity(dirs.len());
        for (_, path) in dirs {
            if let Some(component) = self.read_component(&path).await {
                components.push(component);
            }
        }
        Ok(components)
    }
}

/// Command table over a fixed set of ids.
#[derive(Debug, Clone, Default)]
pub struct StaticCommandTable {
    commands: HashSet<String>,
}

impl StaticCommandTable {
    /// Create a table from ids.
    pub fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    /// Read ids from a file: a JSON string array, or one id per line with
    /// `#` comments.
    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read command table {}", path.display()))?;

        if text.trim_start().starts_with('[') {
            let ids: Vec<String> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse command table {}", path.display()))?;
            return Ok(Self::new(ids));
        }

        Ok(Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        ))
    }

    /// Assume every command declared by an active component is registered.
    ///
    /// Ghost commands cannot be detected against this table.
    pub fn from_declared(manifests: &[ComponentManifest]) -> Self {
        Self::new(
            manifests
                .iter()
                .filter(|m| m.is_active)
                .flat_map(|m| m.commands.iter().map(|c| c.command.clone())),
        )
    }

    /// Number of registered ids.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[async_trait]
impl CommandTable for StaticCommandTable {
    async fn registered_commands(&self) -> Result<HashSet<String>, HostError> {
        Ok(self.commands.clone())
    }
}

/// Edits documents on disk.
///
/// `apply` stages every document in a sibling temp file and only renames
/// once all staging writes succeeded. A failed rename puts back the
/// documents already replaced, and no staging file outlives the call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileEditor;

impl FsFileEditor {
    /// Create a file editor.
    pub fn new() -> Self {
        Self
    }

    fn staging_path(location: &Path) -> PathBuf {
        let mut name = location.file_name().map(OsString::from).unwrap_or_default();
        name.push(".extdoctor-tmp");
        location.with_file_name(name)
    }
}

#[async_trait]
impl FileEditor for FsFileEditor {
    async fn read_text(&self, location: &Path) -> Result<String, HostError> {
        fs::read_to_string(location).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => HostError::NotFound(location.display().to_string()),
            _ => HostError::Io(e),
        })
    }

    async fn apply(&self, edits: &[DocumentEdit]) -> Result<(), HostError> {
        let mut staged = Vec::with_capacity(edits.len());
        let mut originals = Vec::with_capacity(edits.len());
        for edit in edits {
            let staging = Self::staging_path(&edit.location);
            let prepared = match read_original(&edit.location).await {
                Ok(original) => fs::write(&staging, &edit.new_text).await.map(|_| original),
                Err(e) => Err(e),
            };
            match prepared {
                Ok(original) => {
                    staged.push(staging);
                    originals.push(original);
                }
                Err(e) => {
                    remove_all(staged.iter().chain(std::iter::once(&staging)).collect::<Vec<_>>()).await;
                    return Err(HostError::Io(e));
                }
            }
        }

        for (done, (staging, edit)) in staged.iter().zip(edits).enumerate() {
            if let Err(e) = fs::rename(staging, &edit.location).await {
                tracing::warn!(
                    location = %edit.location.display(),
                    "rename failed, restoring {} document(s): {}",
                    done,
                    e
                );
                for (edit, original) in edits[..done].iter().zip(&originals) {
                    restore(&edit.location, original.as_deref()).await;
                }
                remove_all(&staged[done..]).await;
                return Err(HostError::Io(e));
            }
        }
        Ok(())
    }
}

/// Current bytes of `path`, or `None` when it does not exist yet.
async fn read_original(path: &Path) -> std::io::Result<Option<Vec<u8>>> {
    match fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

async fn restore(path: &Path, original: Option<&[u8]>) {
    let result = match original {
        Some(bytes) => fs::write(path, bytes).await,
        None => fs::remove_file(path).await,
    };
    if let Err(e) = result {
        tracing::warn!(location = %path.display(), "cannot restore document: {}", e);
    }
}

async fn remove_all<'a>(paths: impl IntoIterator<Item = &'a PathBuf>) {
    for path in paths {
        let _ = fs::remove_file(path).await;
    }
}

/// Clipboard stand-in for terminals: prints the text for the user to copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutClipboard;

#[async_trait]
impl Clipboard for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<(), HostError> {
        println!("{}", text);
        Ok(())
    }
}
