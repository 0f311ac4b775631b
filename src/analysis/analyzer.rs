//! Conflict analysis over one manifest snapshot.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AnalysisSettings;
use crate::error::{DoctorError, Result};
use crate::host::{CommandTable, ExtensionRegistry};
use crate::manifest::{ComponentManifest, ManifestCollector};

use super::cache::CommandCache;
use super::conflict::{AnalysisSummary, Conflict};
use super::registry::RuleRegistry;
use super::rule::AnalysisContext;

/// Runs the registered rules over a fresh snapshot.
///
/// Every run collects its own snapshot; runs share nothing but the command
/// cache, so overlapping runs are safe.
pub struct ConflictAnalyzer {
    collector: ManifestCollector,
    commands: CommandCache,
    rules: RuleRegistry,
}

impl ConflictAnalyzer {
    /// Create an analyzer with the built-in rules.
    pub fn new(
        registry: Arc<dyn ExtensionRegistry>,
        commands: Arc<dyn CommandTable>,
        settings: &AnalysisSettings,
    ) -> Self {
        Self::with_rules(
            registry,
            commands,
            Duration::from_millis(settings.command_cache_ttl_ms),
            RuleRegistry::with_builtins(settings),
        )
    }

    /// Create an analyzer with a custom rule set.
    pub fn with_rules(
        registry: Arc<dyn ExtensionRegistry>,
        commands: Arc<dyn CommandTable>,
        command_cache_ttl: Duration,
        rules: RuleRegistry,
    ) -> Self {
        Self {
            collector: ManifestCollector::new(registry),
            commands: CommandCache::new(commands, command_cache_ttl),
            rules,
        }
    }

    /// The manifest collector this analyzer reads through.
    pub fn collector(&self) -> &ManifestCollector {
        &self.collector
    }

    /// The rules this analyzer runs.
    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Collect a snapshot and analyze it.
    pub async fn analyze(&self) -> Result<Vec<Conflict>> {
        let snapshot = self.collector.collect().await?;
        self.analyze_snapshot(&snapshot).await
    }

    /// Analyze an already-collected snapshot.
    pub async fn analyze_snapshot(&self, manifests: &[ComponentManifest]) -> Result<Vec<Conflict>> {
        let registered = self
            .commands
            .get()
            .await
            .map_err(|e| DoctorError::host("runtime command query", e))?;

        let ctx = AnalysisContext {
            manifests,
            registered_commands: &registered,
        };
        let conflicts = self.rules.run(&ctx);

        let summary = AnalysisSummary::from_conflicts(&conflicts);
        tracing::info!(
            components = manifests.len(),
            errors = summary.errors,
            warnings = summary.warnings,
            "analysis complete"
        );
        Ok(conflicts)
    }

    /// Forget the memoized command table.
    pub async fn invalidate_command_cache(&self) {
        self.commands.invalidate().await;
    }
}
