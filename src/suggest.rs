//! Keybinding suggestions.
//!
//! Candidates are every combination of [`MODIFIERS`] and [`KEYS`],
//! enumerated modifier-first. The first unused candidates in that order
//! are returned, so the result depends only on the set of bindings already
//! in use.

use std::collections::HashSet;

use crate::analysis::normalize_keybinding;
use crate::manifest::ComponentManifest;

/// Modifier combinations, in enumeration order.
pub const MODIFIERS: [&str; 4] = ["ctrl+shift", "ctrl+alt", "alt+shift", "ctrl+shift+alt"];

/// Keys, in enumeration order: function keys, letters, digits.
pub const KEYS: [&str; 48] = [
    "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12", "a", "b", "c", "d",
    "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s", "t", "u", "v", "w",
    "x", "y", "z", "0", "1", "2", "3", "4", "5", "6", "7", "8", "9",
];

/// Maximum number of suggestions returned.
pub const SUGGESTION_LIMIT: usize = 10;

/// All candidate bindings in enumeration order.
pub fn candidates() -> impl Iterator<Item = String> {
    MODIFIERS
        .iter()
        .flat_map(|modifier| KEYS.iter().map(move |key| format!("{}+{}", modifier, key)))
}

/// Normalized representative key of every keybinding in the snapshot.
pub fn used_bindings(manifests: &[ComponentManifest]) -> HashSet<String> {
    manifests
        .iter()
        .flat_map(|m| &m.keybindings)
        .filter_map(|kb| kb.representative_key())
        .map(normalize_keybinding)
        .collect()
}

/// The first `limit` candidates absent from `used`.
pub fn suggest_unused(used: &HashSet<String>, limit: usize) -> Vec<String> {
    candidates()
        .filter(|candidate| !used.contains(candidate))
        .take(limit)
        .collect()
}

/// Suggests replacement bindings against one manifest snapshot.
#[derive(Debug, Clone, Default)]
pub struct KeybindingSuggester {
    used: HashSet<String>,
}

impl KeybindingSuggester {
    pub fn from_manifests(manifests: &[ComponentManifest]) -> Self {
        Self {
            used: used_bindings(manifests),
        }
    }

    /// Bindings considered taken.
    pub fn used(&self) -> &HashSet<String> {
        &self.used
    }

    /// Up to [`SUGGESTION_LIMIT`] unused bindings to replace `current`.
    ///
    /// `current` itself counts as used, whether or not a manifest
    /// declares it.
    pub fn suggest(&self, current: &str) -> Vec<String> {
        let current = normalize_keybinding(current);
        if current.is_empty() || self.used.contains(&current) {
            return suggest_unused(&self.used, SUGGESTION_LIMIT);
        }
        let mut used = self.used.clone();
        used.insert(current);
        suggest_unused(&used, SUGGESTION_LIMIT)
    }
}
