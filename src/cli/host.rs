//! Engine construction from the filesystem.
//!
//! The CLI has no live host to talk to, so collaborators come from disk:
//! an extensions directory, an optional runtime command list and a log
//! directory.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::engine::DiagnosticsEngine;
use crate::error::{DoctorError, Result};
use crate::host::fs::{FsExtensionRegistry, FsFileEditor, StaticCommandTable, StdoutClipboard};
use crate::host::{CommandTable, TracingSlowOperationHook};
use crate::logs::LogMonitor;
use crate::manifest::ManifestCollector;

use super::args::Cli;

/// Command-line values that override the configuration file.
#[derive(Debug, Clone, Default)]
pub struct HostOverrides {
    pub extensions_dir: Option<PathBuf>,
    pub commands_file: Option<PathBuf>,
    /// Used directly as the log root.
    pub log_dir: Option<PathBuf>,
}

impl From<&Cli> for HostOverrides {
    fn from(cli: &Cli) -> Self {
        Self {
            extensions_dir: cli.extensions_dir.clone(),
            commands_file: cli.commands_file.clone(),
            log_dir: cli.log_dir.clone(),
        }
    }
}

/// Build an engine over filesystem collaborators.
///
/// Without a command list file, the runtime table is assumed to hold every
/// command declared by an active extension. Ghost commands are then never
/// reported.
pub async fn build_engine(config: EngineConfig, overrides: HostOverrides) -> Result<DiagnosticsEngine> {
    let extensions_dir = overrides
        .extensions_dir
        .or_else(|| config.host.extensions_dir.clone())
        .ok_or_else(|| DoctorError::ConfigValidation {
            message: "no extensions directory; pass --extensions-dir or set host.extensions_dir"
                .to_string(),
        })?;

    let registry = Arc::new(
        FsExtensionRegistry::new(extensions_dir).with_inactive(config.host.inactive.iter().cloned()),
    );

    let commands: Arc<dyn CommandTable> =
        match overrides.commands_file.or_else(|| config.host.commands_file.clone()) {
            Some(path) => Arc::new(StaticCommandTable::from_file(&path).await?),
            None => {
                tracing::debug!("no command list; using declared commands of active extensions");
                let snapshot = ManifestCollector::new(registry.clone()).collect().await?;
                Arc::new(StaticCommandTable::from_declared(&snapshot))
            }
        };

    let mut builder = DiagnosticsEngine::builder(
        registry,
        commands,
        Arc::new(FsFileEditor::new()),
        Arc::new(StdoutClipboard),
    )
    .slow_operation_hook(Arc::new(TracingSlowOperationHook));

    if let Some(log_dir) = overrides.log_dir {
        builder = builder.log_monitor(LogMonitor::with_root(log_dir));
    }

    builder.config(config).build()
}
