//! Log source discovery and queries.

use std::path::{Path, PathBuf};

use super::parser::parse_log;
use super::tail::read_tail;
use super::{LogEntry, LogLevel};

/// Reads component logs under a session root.
#[derive(Debug, Clone)]
pub struct LogMonitor {
    root: Option<PathBuf>,
}

impl LogMonitor {
    /// Derive the root from the engine's own per-session log directory.
    ///
    /// The root is that directory's parent; every sibling directory is a
    /// log source. Without a session directory, or one with no parent,
    /// every query returns nothing.
    pub fn new(session_log_dir: Option<&Path>) -> Self {
        let root = session_log_dir
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
        if root.is_none() {
            tracing::debug!("no log root; log queries will be empty");
        }
        Self { root }
    }

    /// Use `root` directly as the directory holding the sources.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Source ids (directory names under the root), sorted.
    pub async fn sources(&self) -> Vec<String> {
        let Some(root) = &self.root else {
            return Vec::new();
        };
        let mut sources = Vec::new();
        let mut dir = match tokio::fs::read_dir(root).await {
            Ok(dir) => dir,
            Err(e) => {
                tracing::debug!(root = %root.display(), "cannot list log root: {}", e);
                return sources;
            }
        };
        while let Ok(Some(entry)) = dir.next_entry().await {
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if is_dir {
                if let Some(name) = entry.file_name().to_str() {
                    sources.push(name.to_string());
                }
            }
        }
        sources.sort();
        sources
    }

    /// Every entry from the `*.log` files of one source.
    ///
    /// Files are read in name order, each through the tail window. A file
    /// that cannot be read contributes nothing.
    pub async fn get_logs(&self, source: &str) -> Vec<LogEntry> {
        let Some(dir) = self.source_dir(source) else {
            return Vec::new();
        };

        let mut entries = Vec::new();
        for file in log_files(&dir).await {
            match read_tail(&file).await {
                Ok(text) => entries.extend(parse_log(&text, source)),
                Err(e) => {
                    tracing::warn!(file = %file.display(), "cannot read log file: {}", e);
                }
            }
        }
        entries
    }

    /// Error entries across all sources, newest first, at most `limit`.
    ///
    /// Timestamps are compared as strings.
    pub async fn get_recent_errors(&self, limit: usize) -> Vec<LogEntry> {
        let mut errors = Vec::new();
        for source in self.sources().await {
            errors.extend(
                self.get_logs(&source)
                    .await
                    .into_iter()
                    .filter(|e| e.level == LogLevel::Error),
            );
        }
        errors.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        errors.truncate(limit);
        errors
    }

    fn source_dir(&self, source: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        if source.is_empty()
            || source == "."
            || source == ".."
            || source.contains('/')
            || source.contains('\\')
        {
            tracing::debug!(source, "rejecting log source id");
            return None;
        }
        Some(root.join(source))
    }
}

async fn log_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let Ok(mut entries) = tokio::fs::read_dir(dir).await else {
        return files;
    };
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        // symlinked logs are listed too; a dangling one fails at read time
        let listed = entry
            .file_type()
            .await
            .map(|t| t.is_file() || t.is_symlink())
            .unwrap_or(false);
        if listed && path.extension().is_some_and(|ext| ext == "log") {
            files.push(path);
        }
    }
    files.sort();
    files
}
