//! Configuration schema definitions for extdoctor.
//!
//! This module contains the struct definitions that map to the
//! `.extdoctor.yml` file format. Every field has a default, so an empty
//! file (or no file at all) yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::analysis::Severity;

/// Root configuration structure for `.extdoctor.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Detector tuning
    pub analysis: AnalysisSettings,

    /// Remediation policy
    pub remediation: RemediationSettings,

    /// Log monitor settings
    pub logs: LogSettings,

    /// Operations slower than this are reported to the slow-operation hook
    #[serde(default = "default_slow_operation_ms")]
    pub slow_operation_ms: u64,

    /// Where the CLI finds host state
    pub host: HostSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisSettings::default(),
            remediation: RemediationSettings::default(),
            logs: LogSettings::default(),
            slow_operation_ms: default_slow_operation_ms(),
            host: HostSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Slow-operation threshold as a duration.
    pub fn slow_operation_threshold(&self) -> Duration {
        Duration::from_millis(self.slow_operation_ms)
    }
}

/// Detector tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// An activation event is reported when more than this many components
    /// declare it
    pub activation_overlap_threshold: usize,

    /// Severity for command id collisions
    pub command_collision_severity: Severity,

    /// Component id prefixes treated as built-in and skipped by the
    /// registration rule
    pub builtin_prefixes: Vec<String>,

    /// How long a fetched runtime command list is reused
    pub command_cache_ttl_ms: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            activation_overlap_threshold: 2,
            command_collision_severity: Severity::Error,
            builtin_prefixes: vec!["vscode.".to_string()],
            command_cache_ttl_ms: 5_000,
        }
    }
}

/// Remediation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationSettings {
    /// Whether batch remediation writes manifests or only previews edits
    pub auto_apply: bool,
}

impl Default for RemediationSettings {
    fn default() -> Self {
        Self { auto_apply: true }
    }
}

/// Log monitor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// The engine's own per-session log directory; its parent is the log root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_log_dir: Option<PathBuf>,

    /// Default number of entries returned by recent-error queries
    pub recent_error_limit: usize,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            session_log_dir: None,
            recent_error_limit: 50,
        }
    }
}

/// Where the CLI finds host state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostSettings {
    /// Directory with one sub-directory per installed component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions_dir: Option<PathBuf>,

    /// File listing runtime-registered command ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commands_file: Option<PathBuf>,

    /// Component ids to treat as installed but inactive
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inactive: Vec<String>,
}

fn default_slow_operation_ms() -> u64 {
    1_000
}
