//! Component manifest snapshot.
//!
//! A [`ComponentManifest`] is the typed, immutable view of one installed
//! component that every detector reads. Missing manifest sections become
//! empty collections, never `None`.

pub mod collector;

pub use collector::ManifestCollector;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::host::ComponentDescriptor;

/// Typed snapshot of one component's contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentManifest {
    pub id: String,
    pub display_name: String,
    pub publisher: String,
    pub version: String,
    pub is_active: bool,
    pub commands: Vec<CommandContribution>,
    pub keybindings: Vec<KeybindingContribution>,
    pub activation_events: Vec<String>,
}

/// A contributed command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandContribution {
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A contributed keybinding with its platform variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeybindingContribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win: Option<String>,
    pub command: String,
}

impl KeybindingContribution {
    /// First defined variant in `key`, `mac`, `linux`, `win` order.
    pub fn representative_key(&self) -> Option<&str> {
        [&self.key, &self.mac, &self.linux, &self.win]
            .into_iter()
            .filter_map(|k| k.as_deref())
            .find(|k| !k.trim().is_empty())
    }
}

impl ComponentManifest {
    /// Build the typed snapshot from a registry descriptor.
    ///
    /// Malformed entries (no command id, wrong JSON type) are skipped rather
    /// than failing the whole component.
    pub fn from_descriptor(descriptor: &ComponentDescriptor) -> Self {
        let manifest = &descriptor.package_json;
        let contributes = manifest.get("contributes");

        let commands = entries(contributes.and_then(|c| c.get("commands")))
            .filter_map(|entry| {
                Some(CommandContribution {
                    command: string_field(entry, "command")?,
                    title: string_field(entry, "title"),
                    category: string_field(entry, "category"),
                })
            })
            .collect();

        let keybindings = entries(contributes.and_then(|c| c.get("keybindings")))
            .filter_map(|entry| {
                Some(KeybindingContribution {
                    command: string_field(entry, "command")?,
                    key: string_field(entry, "key"),
                    mac: string_field(entry, "mac"),
                    linux: string_field(entry, "linux"),
                    win: string_field(entry, "win"),
                })
            })
            .collect();

        let activation_events = manifest
            .get("activationEvents")
            .and_then(Value::as_array)
            .map(|events| {
                events
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let display_name = descriptor
            .display_name
            .clone()
            .or_else(|| string_field(manifest, "name"))
            .unwrap_or_else(|| descriptor.id.clone());

        Self {
            id: descriptor.id.clone(),
            display_name,
            publisher: descriptor.publisher.clone(),
            version: descriptor.version.clone(),
            is_active: descriptor.is_active,
            commands,
            keybindings,
            activation_events,
        }
    }
}

/// Contribution points accept either a single object or an array of them.
fn entries(section: Option<&Value>) -> Box<dyn Iterator<Item = &Value> + '_> {
    match section {
        Some(Value::Array(items)) => Box::new(items.iter()),
        Some(obj @ Value::Object(_)) => Box::new(std::iter::once(obj)),
        _ => Box::new(std::iter::empty()),
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_manifest() {
        let desc = ComponentDescriptor::new(
            "acme.tools",
            json!({
                "displayName": "Acme Tools",
                "publisher": "acme",
                "version": "1.0.0",
                "activationEvents": ["onCommand:acme.run", "onLanguage:rust"],
                "contributes": {
                    "commands": [
                        {"command": "acme.run", "title": "Run", "category": "Acme"},
                        {"command": "acme.stop"}
                    ],
                    "keybindings": [
                        {"key": "ctrl+alt+r", "mac": "cmd+alt+r", "command": "acme.run"}
                    ]
                }
            }),
        );

        let manifest = ComponentManifest::from_descriptor(&desc);
        assert_eq!(manifest.display_name, "Acme Tools");
        assert_eq!(manifest.commands.len(), 2);
        assert_eq!(manifest.commands[0].title.as_deref(), Some("Run"));
        assert_eq!(manifest.commands[1].title, None);
        assert_eq!(manifest.keybindings.len(), 1);
        assert_eq!(manifest.activation_events.len(), 2);
    }

    #[test]
    fn missing_contributes_yields_empty_collections() {
        let desc = ComponentDescriptor::new("bare.one", json!({"name": "bare"}));
        let manifest = ComponentManifest::from_descriptor(&desc);
        assert!(manifest.commands.is_empty());
        assert!(manifest.keybindings.is_empty());
        assert!(manifest.activation_events.is_empty());
        assert_eq!(manifest.display_name, "bare");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let desc = ComponentDescriptor::new("anon.one", json!({}));
        assert_eq!(ComponentManifest::from_descriptor(&desc).display_name, "anon.one");
    }

    #[test]
    fn single_object_contribution_is_accepted() {
        let desc = ComponentDescriptor::new(
            "one.kb",
            json!({"contributes": {"keybindings": {"key": "f5", "command": "one.go"}}}),
        );
        let manifest = ComponentManifest::from_descriptor(&desc);
        assert_eq!(manifest.keybindings.len(), 1);
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let desc = ComponentDescriptor::new(
            "messy.one",
            json!({
                "activationEvents": ["*", 42],
                "contributes": {"commands": [{"title": "no id"}, "junk", {"command": "messy.ok"}]}
            }),
        );
        let manifest = ComponentManifest::from_descriptor(&desc);
        assert_eq!(manifest.commands.len(), 1);
        assert_eq!(manifest.commands[0].command, "messy.ok");
        assert_eq!(manifest.activation_events, vec!["*".to_string()]);
    }

    #[test]
    fn representative_key_follows_priority() {
        let kb = KeybindingContribution {
            mac: Some("cmd+k".into()),
            win: Some("ctrl+k".into()),
            command: "x".into(),
            ..Default::default()
        };
        assert_eq!(kb.representative_key(), Some("cmd+k"));

        let kb = KeybindingContribution {
            key: Some("f1".into()),
            mac: Some("cmd+k".into()),
            command: "x".into(),
            ..Default::default()
        };
        assert_eq!(kb.representative_key(), Some("f1"));

        let kb = KeybindingContribution {
            command: "x".into(),
            ..Default::default()
        };
        assert_eq!(kb.representative_key(), None);
    }
}
