//! The diagnostics engine facade.
//!
//! [`DiagnosticsEngine`] wires the analyzer, remediation, suggestion and log
//! components to one set of host collaborators and exposes the operations
//! a UI or CLI layer calls.

use std::sync::Arc;

use crate::analysis::{Conflict, ConflictAnalyzer, RuleRegistry};
use crate::config::{validate, EngineConfig};
use crate::error::{DoctorError, Result};
use crate::host::hook::timed;
use crate::host::{Clipboard, CommandTable, ExtensionRegistry, FileEditor, SlowOperationHook};
use crate::logs::{LogEntry, LogMonitor};
use crate::remediation::{RemediationEngine, RemediationOutcome, RemediationPolicy};
use crate::suggest::KeybindingSuggester;

/// Entry point for every diagnostics operation.
pub struct DiagnosticsEngine {
    config: EngineConfig,
    analyzer: ConflictAnalyzer,
    remediation: RemediationEngine,
    logs: LogMonitor,
    slow_hook: Option<Arc<dyn SlowOperationHook>>,
}

impl DiagnosticsEngine {
    /// Start building an engine over the required collaborators.
    pub fn builder(
        registry: Arc<dyn ExtensionRegistry>,
        commands: Arc<dyn CommandTable>,
        files: Arc<dyn FileEditor>,
        clipboard: Arc<dyn Clipboard>,
    ) -> DiagnosticsEngineBuilder {
        DiagnosticsEngineBuilder {
            registry,
            commands,
            files,
            clipboard,
            config: EngineConfig::default(),
            slow_hook: None,
            rules: None,
            log_monitor: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &ConflictAnalyzer {
        &self.analyzer
    }

    /// Collect a fresh snapshot and run every rule over it.
    pub async fn run_full_analysis(&self) -> Result<Vec<Conflict>> {
        timed(
            self.slow_hook.as_deref(),
            self.config.slow_operation_threshold(),
            "full analysis",
            self.analyzer.analyze(),
        )
        .await
    }

    /// Produce the manual fix for one conflict. Never writes files.
    pub async fn run_single_remediation(&self, conflict: &Conflict) -> RemediationOutcome {
        self.remediation.remediate_single(conflict).await
    }

    /// Analyze, then patch every missing activation declaration found.
    pub async fn run_batch_remediation(&self) -> Result<RemediationOutcome> {
        timed(
            self.slow_hook.as_deref(),
            self.config.slow_operation_threshold(),
            "batch remediation",
            async {
                let conflicts = self.analyzer.analyze().await?;
                Ok::<_, DoctorError>(self.remediation.remediate_batch(&conflicts).await)
            },
        )
        .await
    }

    /// Patch the missing activation declarations among `conflicts`.
    pub async fn remediate_conflicts(&self, conflicts: &[Conflict]) -> RemediationOutcome {
        timed(
            self.slow_hook.as_deref(),
            self.config.slow_operation_threshold(),
            "batch remediation",
            self.remediation.remediate_batch(conflicts),
        )
        .await
    }

    /// Unused bindings that could replace `current`.
    pub async fn suggest_keybindings(&self, current: &str) -> Result<Vec<String>> {
        let snapshot = self.analyzer.collector().collect().await?;
        Ok(KeybindingSuggester::from_manifests(&snapshot).suggest(current))
    }

    /// Parsed entries for one log source.
    pub async fn get_logs(&self, source: &str) -> Vec<LogEntry> {
        self.logs.get_logs(source).await
    }

    /// Most recent error entries across all sources.
    ///
    /// `None` uses the configured default limit.
    pub async fn get_recent_errors(&self, limit: Option<usize>) -> Vec<LogEntry> {
        let limit = limit.unwrap_or(self.config.logs.recent_error_limit);
        timed(
            self.slow_hook.as_deref(),
            self.config.slow_operation_threshold(),
            "recent error aggregation",
            self.logs.get_recent_errors(limit),
        )
        .await
    }

    /// Known log source ids.
    pub async fn log_sources(&self) -> Vec<String> {
        self.logs.sources().await
    }

    /// Drop the memoized runtime command list.
    pub async fn invalidate_command_cache(&self) {
        self.analyzer.invalidate_command_cache().await;
    }
}

/// Builder for [`DiagnosticsEngine`].
pub struct DiagnosticsEngineBuilder {
    registry: Arc<dyn ExtensionRegistry>,
    commands: Arc<dyn CommandTable>,
    files: Arc<dyn FileEditor>,
    clipboard: Arc<dyn Clipboard>,
    config: EngineConfig,
    slow_hook: Option<Arc<dyn SlowOperationHook>>,
    rules: Option<RuleRegistry>,
    log_monitor: Option<LogMonitor>,
}

impl DiagnosticsEngineBuilder {
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Notify `hook` about operations slower than the configured threshold.
    pub fn slow_operation_hook(mut self, hook: Arc<dyn SlowOperationHook>) -> Self {
        self.slow_hook = Some(hook);
        self
    }

    /// Replace the built-in rule set.
    pub fn rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Read logs through `monitor` instead of one derived from the config.
    pub fn log_monitor(mut self, monitor: LogMonitor) -> Self {
        self.log_monitor = Some(monitor);
        self
    }

    /// Validate the configuration and assemble the engine.
    pub fn build(self) -> Result<DiagnosticsEngine> {
        validate(&self.config)?;

        let analyzer = match self.rules {
            Some(rules) => ConflictAnalyzer::with_rules(
                self.registry.clone(),
                self.commands,
                std::time::Duration::from_millis(self.config.analysis.command_cache_ttl_ms),
                rules,
            ),
            None => ConflictAnalyzer::new(
                self.registry.clone(),
                self.commands,
                &self.config.analysis,
            ),
        };

        let remediation = RemediationEngine::new(
            self.registry,
            self.files,
            self.clipboard,
            RemediationPolicy::from(&self.config.remediation),
        );

        let logs = self
            .log_monitor
            .unwrap_or_else(|| LogMonitor::new(self.config.logs.session_log_dir.as_deref()));

        Ok(DiagnosticsEngine {
            config: self.config,
            analyzer,
            remediation,
            logs,
            slow_hook: self.slow_hook,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ConflictCode;
    use crate::host::memory::{
        InMemoryClipboard, InMemoryCommandTable, InMemoryFileEditor, InMemoryRegistry,
    };
    use crate::host::ComponentDescriptor;
    use serde_json::json;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl SlowOperationHook for Recorder {
        fn on_slow_operation(&self, operation: &str, _elapsed: Duration) {
            self.0.lock().unwrap().push(operation.to_string());
        }
    }

    fn engine_with(config: EngineConfig) -> (DiagnosticsEngineBuilder, Arc<InMemoryFileEditor>) {
        let manifest = json!({
            "name": "one",
            "contributes": {
                "commands": [{"command": "a.run"}],
                "keybindings": [{"key": "ctrl+shift+f1", "command": "a.run"}]
            }
        });
        let component = ComponentDescriptor::new("a.one", manifest)
            .with_manifest_location("/ext/a.one/package.json");
        let registry = Arc::new(InMemoryRegistry::new(vec![component]));
        let files = Arc::new(InMemoryFileEditor::new());
        let builder = DiagnosticsEngine::builder(
            registry,
            Arc::new(InMemoryCommandTable::new(["a.run"])),
            files.clone(),
            Arc::new(InMemoryClipboard::new()),
        )
        .config(config);
        (builder, files)
    }

    #[test]
    fn build_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.analysis.activation_overlap_threshold = 0;
        let (builder, _) = engine_with(config);
        assert!(builder.build().is_err());
    }

    #[tokio::test]
    async fn full_analysis_reports_missing_activation() {
        let (builder, _) = engine_with(EngineConfig::default());
        let engine = builder.build().unwrap();

        let conflicts = engine.run_full_analysis().await.unwrap();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].code, ConflictCode::MissingActivationEvent);
    }

    #[tokio::test]
    async fn batch_remediation_analyzes_then_patches() {
        let (builder, files) = engine_with(EngineConfig::default());
        files.insert("/ext/a.one/package.json", "{\"name\": \"one\"}").await;
        let engine = builder.build().unwrap();

        let outcome = engine.run_batch_remediation().await.unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.applied_count(), 1);
        assert_eq!(files.apply_count(), 1);
    }

    #[tokio::test]
    async fn suggestions_exclude_declared_bindings() {
        let (builder, _) = engine_with(EngineConfig::default());
        let engine = builder.build().unwrap();

        let got = engine.suggest_keybindings("ctrl+shift+f1").await.unwrap();
        assert_eq!(got[0], "ctrl+shift+f2");
    }

    #[tokio::test]
    async fn slow_operations_reach_the_hook() {
        let mut config = EngineConfig::default();
        config.slow_operation_ms = 0;
        let recorder = Arc::new(Recorder::default());
        let (builder, _) = engine_with(config);
        let engine = builder.slow_operation_hook(recorder.clone()).build().unwrap();

        engine.run_full_analysis().await.unwrap();
        engine.get_recent_errors(None).await;

        let seen = recorder.0.lock().unwrap().clone();
        assert!(seen.contains(&"full analysis".to_string()));
        assert!(seen
            .iter()
            .all(|op| op == "full analysis" || op == "recent error aggregation"));
    }

    #[tokio::test]
    async fn logs_are_empty_without_session_dir() {
        let (builder, _) = engine_with(EngineConfig::default());
        let engine = builder.build().unwrap();
        assert!(engine.log_sources().await.is_empty());
        assert!(engine.get_logs("git").await.is_empty());
        assert!(engine.get_recent_errors(Some(5)).await.is_empty());
    }
}
