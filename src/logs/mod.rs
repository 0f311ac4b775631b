//! Component log access.
//!
//! Every component writes into its own directory under a shared session
//! root: `<root>/<source>/*.log`. The [`LogMonitor`] reads those files
//! through a bounded tail window ([`read_tail`]) and parses them into
//! [`LogEntry`] records ([`parse_log`]).
//!
//! Log queries never fail. A missing root, an unknown source or an
//! unreadable file all produce fewer (or no) entries.

pub mod monitor;
pub mod parser;
pub mod tail;

pub use monitor::LogMonitor;
pub use parser::{normalize_level, parse_log};
pub use tail::{read_tail, TAIL_WINDOW_BYTES, TRUNCATION_MARKER};

use serde::Serialize;

/// Normalized severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

/// One parsed log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Timestamp exactly as written, expected to be ISO-8601.
    pub timestamp: String,
    pub level: LogLevel,
    /// Message text; continuation lines are joined with `\n`.
    pub message: String,
    /// Source directory the entry was read from.
    pub source: String,
}
