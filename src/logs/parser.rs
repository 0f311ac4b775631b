//! Log line parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::{LogEntry, LogLevel};

// [timestamp] [channel] [level] message
static ENTRY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]+)\]\s*\[([^\]]*)\]\s*\[([^\]]+)\]\s?(.*)$")
        .expect("log entry regex is valid")
});

/// Map a free-form level token onto [`LogLevel`].
///
/// Matching is case-insensitive and by substring, checked in the order
/// error, warn, debug/trace. Anything else is info.
pub fn normalize_level(token: &str) -> LogLevel {
    let token = token.to_ascii_lowercase();
    if token.contains("error") {
        LogLevel::Error
    } else if token.contains("warn") {
        LogLevel::Warn
    } else if token.contains("debug") || token.contains("trace") {
        LogLevel::Debug
    } else {
        LogLevel::Info
    }
}

/// Parse log text into entries attributed to `source`.
///
/// A line in the entry format starts a new entry. Other non-empty lines
/// are appended to the previous entry's message, or dropped when no entry
/// has started yet.
pub fn parse_log(text: &str, source: &str) -> Vec<LogEntry> {
    let mut entries: Vec<LogEntry> = Vec::new();

    for line in text.lines() {
        if let Some(caps) = ENTRY_REGEX.captures(line) {
            entries.push(LogEntry {
                timestamp: caps[1].trim().to_string(),
                level: normalize_level(&caps[3]),
                message: caps[4].to_string(),
                source: source.to_string(),
            });
        } else if !line.trim().is_empty() {
            if let Some(last) = entries.last_mut() {
                last.message.push('\n');
                last.message.push_str(line);
            }
        }
    }

    entries
}
