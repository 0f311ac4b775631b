//! Manifest patching.
//!
//! Adds `onCommand:` activation events to a manifest document and
//! re-serializes it with the document's own indentation.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};
use thiserror::Error;

/// Why a manifest could not be patched.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document root is not an object.
    #[error("manifest root is not an object")]
    NotAnObject,

    /// `activationEvents` exists but is not an array.
    #[error("activationEvents is not an array")]
    InvalidActivationEvents,
}

/// Ensure `onCommand:<id>` is present for every id.
///
/// Returns `Ok(None)` when every event is already declared, so repeated
/// runs produce no edit. Otherwise the events array is sorted and the
/// whole document returned.
pub fn add_activation_events(
    text: &str,
    command_ids: &[String],
) -> Result<Option<String>, PatchError> {
    let mut doc: Value = serde_json::from_str(text)?;
    let root = doc.as_object_mut().ok_or(PatchError::NotAnObject)?;

    let events = root
        .entry("activationEvents")
        .or_insert_with(|| Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or(PatchError::InvalidActivationEvents)?;

    let mut added = false;
    for id in command_ids {
        let token = format!("onCommand:{}", id);
        if !events.iter().any(|e| e.as_str() == Some(token.as_str())) {
            events.push(Value::String(token));
            added = true;
        }
    }
    if !added {
        return Ok(None);
    }

    events.sort_by_key(sort_key);

    let mut out = match detect_indent(text) {
        Some(indent) => to_string_with_indent(&doc, &indent)?,
        None => serde_json::to_string(&doc)?,
    };
    if text.ends_with('\n') {
        out.push('\n');
    }
    Ok(Some(out))
}

/// Leading whitespace of the first indented line.
///
/// `None` for a single-line document, which is written back compactly. A
/// multi-line document without indented lines yields an empty indent.
pub fn detect_indent(text: &str) -> Option<String> {
    if !text.trim_end().contains('\n') {
        return None;
    }
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            line.chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .collect::<String>()
        })
        .find(|indent| !indent.is_empty())
        .unwrap_or_default();
    Some(indent)
}

fn sort_key(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_string_with_indent(value: &Value, indent: &str) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
