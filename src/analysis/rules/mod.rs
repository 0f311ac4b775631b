//! Built-in detector rules.

pub mod activation_overlap;
pub mod command_collision;
pub mod keybinding_collision;
pub mod registration_mismatch;

pub use activation_overlap::ActivationOverlapRule;
pub use command_collision::CommandCollisionRule;
pub use keybinding_collision::KeybindingCollisionRule;
pub use registration_mismatch::RegistrationMismatchRule;

use std::collections::HashMap;

/// Groups values by key, remembering first-seen key order.
pub(crate) struct OrderedGroups<V> {
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<V>)>,
}

impl<V> OrderedGroups<V> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// The group for `key`, created empty on first use.
    pub(crate) fn entry(&mut self, key: &str) -> &mut Vec<V> {
        let slot = match self.index.get(key) {
            Some(&slot) => slot,
            None => {
                self.groups.push((key.to_string(), Vec::new()));
                self.index.insert(key.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        &mut self.groups[slot].1
    }

    pub(crate) fn into_groups(self) -> impl Iterator<Item = (String, Vec<V>)> {
        self.groups.into_iter()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::manifest::{CommandContribution, ComponentManifest, KeybindingContribution};

    /// Active manifest with the given id and no contributions.
    pub(crate) fn manifest(id: &str) -> ComponentManifest {
        ComponentManifest {
            id: id.to_string(),
            display_name: id.to_uppercase(),
            publisher: "test".to_string(),
            version: "1.0.0".to_string(),
            is_active: true,
            commands: Vec::new(),
            keybindings: Vec::new(),
            activation_events: Vec::new(),
        }
    }

    pub(crate) fn with_commands(mut m: ComponentManifest, ids: &[&str]) -> ComponentManifest {
        m.commands.extend(ids.iter().map(|id| CommandContribution {
            command: id.to_string(),
            title: None,
            category: None,
        }));
        m
    }

    pub(crate) fn with_key(mut m: ComponentManifest, key: &str, command: &str) -> ComponentManifest {
        m.keybindings.push(KeybindingContribution {
            key: Some(key.to_string()),
            command: command.to_string(),
            ..Default::default()
        });
        m
    }

    pub(crate) fn with_events(mut m: ComponentManifest, events: &[&str]) -> ComponentManifest {
        m.activation_events
            .extend(events.iter().map(|e| e.to_string()));
        m
    }
}
