//! Host context handed to every run capability.

use std::collections::HashMap;

use serde_json::Value;

/// Opaque host context passed to run capabilities.
///
/// The core never interprets the entries; hosts load whatever their
/// commands need (version info, command summaries, handles to services).
#[derive(Debug, Clone, Default)]
pub struct Helper {
    context: HashMap<String, Value>,
}

impl Helper {
    /// Create an empty helper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// Look up a context entry.
    pub fn context(&self, key: &str) -> Option<&Value> {
        self.context.get(key)
    }
}
