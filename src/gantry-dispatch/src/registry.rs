//! Insertion-ordered command registry.

use indexmap::IndexMap;

use crate::command::{CommandDescriptor, GroupSpec};
use crate::error::{DispatchError, Result};

/// Keyed collection of command descriptors.
///
/// Built once per process invocation from discovered group/command
/// definitions and read-only afterwards. Insertion order is preserved
/// (groups in discovery order, commands in listed order) so help text and
/// registration order are stable across runs.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: IndexMap<String, CommandDescriptor>,
}

impl CommandRegistry {
    /// Build a registry from group definitions.
    ///
    /// Fails closed on a malformed spec or a duplicate composite key; no
    /// partial registry escapes. A collision means user commands are
    /// ambiguous or a discovered command conflicts with a builtin, so it is
    /// surfaced rather than silently overwritten.
    pub fn build(groups: Vec<GroupSpec>) -> Result<Self> {
        let mut commands = IndexMap::new();

        for group in groups {
            if group.name.trim().is_empty() {
                return Err(DispatchError::invalid_spec("group name is empty"));
            }

            for spec in group.commands {
                if spec.name.trim().is_empty() {
                    return Err(DispatchError::invalid_spec(format!(
                        "command in group '{}' has an empty name",
                        group.name
                    )));
                }

                let descriptor = spec.into_descriptor(&group.name);
                let key = descriptor.key();
                if commands.contains_key(&key) {
                    return Err(DispatchError::DuplicateCommand(key));
                }

                tracing::debug!(key = %key, "registered command");
                commands.insert(key, descriptor);
            }
        }

        Ok(Self { commands })
    }

    /// Look up a descriptor by composite key.
    pub fn get(&self, key: &str) -> Option<&CommandDescriptor> {
        self.commands.get(key)
    }

    /// Whether a composite key is registered.
    pub fn contains(&self, key: &str) -> bool {
        self.commands.contains_key(key)
    }

    /// Iterate over (composite key, descriptor) pairs in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CommandDescriptor)> {
        self.commands
            .iter()
            .map(|(key, descriptor)| (key.as_str(), descriptor))
    }

    /// Composite keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Group names in first-seen order.
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for descriptor in self.commands.values() {
            if !groups.contains(&descriptor.group.as_str()) {
                groups.push(&descriptor.group);
            }
        }
        groups
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
