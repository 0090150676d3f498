//! Parsed-invocation view handed to command handlers.

use std::collections::HashMap;

use serde_json::Value;

use crate::alias::AliasSet;

/// Arguments for one resolved invocation: option values plus the alias
/// table the parser decided on.
#[derive(Debug, Clone, Default)]
pub struct ParsedArgs {
    options: HashMap<String, Value>,
    aliases: AliasSet,
}

impl ParsedArgs {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the parser's alias table.
    pub fn with_aliases(mut self, aliases: AliasSet) -> Self {
        self.aliases = aliases;
        self
    }

    /// Set an option value. Used by parser implementations and tests.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.options.insert(name.into(), value);
    }

    /// The raw value for an option, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// The option value as a string slice, if present and a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.options.get(name).and_then(Value::as_str)
    }

    /// The option value as a bool, if present and a bool.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.options.get(name).and_then(Value::as_bool)
    }

    /// Whether a boolean flag was set. Missing flags read as false.
    pub fn flag(&self, name: &str) -> bool {
        self.get_bool(name).unwrap_or(false)
    }

    /// Whether the option is present at all.
    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// The parser's post-parse alias table.
    pub fn aliases(&self) -> &AliasSet {
        &self.aliases
    }
}
