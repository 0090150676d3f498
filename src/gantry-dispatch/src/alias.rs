//! Post-parse alias table and short-alias resolution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Alias table the parser exposes after parsing: long option name to the
/// alias list the parser decided on.
///
/// The table is an external fact supplied at call time. Collisions between
/// long names are the parser's concern and are surfaced as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasSet(HashMap<String, Vec<String>>);

impl AliasSet {
    /// Create an empty alias table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an alias for a long option name. Duplicates are ignored.
    pub fn insert(&mut self, option: impl Into<String>, alias: impl Into<String>) {
        let aliases = self.0.entry(option.into()).or_default();
        let alias = alias.into();
        if !aliases.contains(&alias) {
            aliases.push(alias);
        }
    }

    /// The first single-character alias for a long option name, if any.
    pub fn resolve(&self, option: &str) -> Option<char> {
        self.0
            .get(option)?
            .iter()
            .find_map(|alias| match alias.chars().collect::<Vec<_>>()[..] {
                [c] => Some(c),
                _ => None,
            })
    }

    /// All aliases recorded for a long option name.
    pub fn get(&self, option: &str) -> Option<&[String]> {
        self.0.get(option).map(|aliases| aliases.as_slice())
    }

    /// Iterate over (long name, alias list) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(option, aliases)| (option.as_str(), aliases.as_slice()))
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, Vec<String>>> for AliasSet {
    fn from(table: HashMap<String, Vec<String>>) -> Self {
        Self(table)
    }
}
