//! Shared fixtures: group definitions with controllable outcomes and a
//! recording parser stub.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::json;

use gantry_dispatch::{
    AliasSet, CommandHandler, CommandSpec, GroupSpec, OptionSpec, ParserHandle, Result,
    composite_key,
};

/// Keys a register capability was invoked with, shared with the test body.
pub type SeenKeys = Arc<Mutex<Vec<String>>>;

/// Build group specs from `(group, [(command, fails)])` definitions.
///
/// Each command's run capability resolves with its composite key; when
/// `fails` is set it rejects with the composite key as the error message.
/// Each register capability records the key it received into `seen`.
pub fn group_specs(defs: &[(&str, &[(&str, bool)])], seen: SeenKeys) -> Vec<GroupSpec> {
    defs.iter()
        .map(|(group_name, commands)| {
            let mut group = GroupSpec::new(*group_name);
            for (command_name, fails) in commands.iter() {
                let key = composite_key(group_name, command_name);
                let run_key = key.clone();
                let fails = *fails;
                let seen = seen.clone();

                let spec = CommandSpec::new(*command_name, move |_helper, _args| {
                    let key = run_key.clone();
                    async move {
                        if fails {
                            Err(anyhow::anyhow!(key))
                        } else {
                            Ok(json!(key))
                        }
                    }
                })
                .with_description(format!("run {key}"))
                .with_register(move |key, _parser| {
                    seen.lock().unwrap().push(key.to_string());
                    Ok(())
                });

                group = group.with_command(spec);
            }
            group
        })
        .collect()
}

/// Parser stub that records every call made during binding.
#[derive(Default)]
pub struct RecordingParser {
    /// (name, description) per group registration.
    pub group_calls: Vec<(String, String)>,

    /// (composite key, description) per command registration.
    pub command_calls: Vec<(String, String)>,

    /// Options attached during registration.
    pub options: Vec<(String, OptionSpec)>,

    /// Configuration calls in the order they arrived.
    pub config_calls: Vec<String>,

    /// Captured handlers by composite key.
    pub handlers: HashMap<String, CommandHandler>,

    /// Alias table built from `help`/`alias` calls.
    pub aliases: AliasSet,

    current_group: Option<String>,
}

impl RecordingParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the post-parse alias table, as an external parser would.
    pub fn with_aliases(mut self, aliases: AliasSet) -> Self {
        self.aliases = aliases;
        self
    }

    /// The captured handler for a composite key.
    pub fn handler(&self, key: &str) -> &CommandHandler {
        self.handlers
            .get(key)
            .unwrap_or_else(|| panic!("no handler captured for '{key}'"))
    }
}

impl ParserHandle for RecordingParser {
    fn group(
        &mut self,
        name: &str,
        description: &str,
        builder: &mut dyn FnMut(&mut dyn ParserHandle) -> Result<()>,
    ) -> Result<()> {
        self.group_calls
            .push((name.to_string(), description.to_string()));
        self.current_group = Some(name.to_string());
        let result = builder(self);
        self.current_group = None;
        result
    }

    fn command(
        &mut self,
        name: &str,
        description: &str,
        options: &mut dyn FnMut(&mut dyn ParserHandle) -> Result<()>,
        handler: CommandHandler,
    ) -> Result<()> {
        let group = self.current_group.clone().expect("command outside a group");
        let key = composite_key(&group, name);
        self.command_calls.push((key.clone(), description.to_string()));
        options(self)?;
        self.handlers.insert(key, handler);
        Ok(())
    }

    fn option(&mut self, name: &str, spec: OptionSpec) {
        if let Some(alias) = spec.alias {
            self.aliases.insert(name, alias.to_string());
        }
        self.options.push((name.to_string(), spec));
    }

    fn demand(&mut self, count: usize) {
        self.config_calls.push(format!("demand({count})"));
    }

    fn usage(&mut self, _text: &str) {
        self.config_calls.push("usage".to_string());
    }

    fn epilog(&mut self, _text: &str) {
        self.config_calls.push("epilog".to_string());
    }

    fn help(&mut self, flag: &str) {
        self.aliases.insert("help", flag);
        self.config_calls.push(format!("help({flag})"));
    }

    fn alias(&mut self, from: &str, to: &str) {
        self.aliases.insert(to, from);
        self.config_calls.push(format!("alias({from},{to})"));
    }

    fn strict(&mut self) {
        self.config_calls.push("strict".to_string());
    }

    fn parsed_aliases(&self) -> AliasSet {
        self.aliases.clone()
    }
}

/// Fresh shared key recorder.
pub fn seen_keys() -> SeenKeys {
    Arc::new(Mutex::new(Vec::new()))
}
