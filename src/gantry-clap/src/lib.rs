//! Clap-backed implementation of the gantry parser seam.
//!
//! [`ClapParser`] records the command tree the binder wires into it, then
//! materializes a `clap::Command` hierarchy for one invocation: parse argv,
//! resolve the selected group and command, convert the matches into
//! [`ParsedArgs`], and invoke the stored handler. Exactly one handler runs
//! per [`ClapParser::run`].

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::Value;

use gantry_dispatch::{
    AliasSet, CommandHandler, DispatchError, OptionKind, OptionSpec, Outcome, ParsedArgs,
    ParserHandle, Result,
};

struct OptionDef {
    name: String,
    spec: OptionSpec,
}

struct CommandNode {
    name: String,
    description: String,
    options: Vec<OptionDef>,
    handler: CommandHandler,
}

struct GroupNode {
    name: String,
    description: String,
    commands: Vec<CommandNode>,
}

/// Parser handle backed by clap's builder API.
pub struct ClapParser {
    bin_name: String,
    groups: Vec<GroupNode>,
    usage: Option<String>,
    epilog: Option<String>,
    subcommand_required: bool,
    strict: bool,
    aliases: AliasSet,
    current_group: Option<usize>,
    current_command: Option<usize>,
}

impl ClapParser {
    /// Create an empty parser for the given binary name.
    pub fn new(bin_name: impl Into<String>) -> Self {
        Self {
            bin_name: bin_name.into(),
            groups: Vec::new(),
            usage: None,
            epilog: None,
            subcommand_required: false,
            strict: false,
            aliases: AliasSet::new(),
            current_group: None,
            current_command: None,
        }
    }

    /// Materialize the recorded tree as a `clap::Command`.
    fn build_tree(&self) -> Command {
        let mut root = Command::new(self.bin_name.clone()).disable_version_flag(true);
        if let Some(usage) = &self.usage {
            root = root.override_usage(usage.clone());
        }
        if let Some(epilog) = &self.epilog {
            root = root.after_help(epilog.clone());
        }
        if self.subcommand_required {
            root = root.subcommand_required(true).arg_required_else_help(true);
        }
        if !self.strict {
            root = root.allow_external_subcommands(true);
        }

        for group in &self.groups {
            let mut node = Command::new(group.name.clone()).about(group.description.clone());
            if self.subcommand_required {
                node = node.subcommand_required(true).arg_required_else_help(true);
            }
            for command in &group.commands {
                let mut leaf =
                    Command::new(command.name.clone()).about(command.description.clone());
                for option in &command.options {
                    leaf = leaf.arg(build_arg(&option.name, &option.spec));
                }
                node = node.subcommand(leaf);
            }
            root = root.subcommand(node);
        }
        root
    }

    /// Parse argv, resolve the selected group+command, and run its handler.
    ///
    /// Help and version requests print and succeed with `Value::Null`; every
    /// other parse failure maps to [`DispatchError::Parser`].
    pub async fn run<I, T>(mut self, argv: I) -> Outcome
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.build_tree().try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(err) => return map_parse_error(err),
        };

        let (group_name, group_matches) = matches
            .subcommand()
            .ok_or_else(|| DispatchError::Parser("no command group selected".to_string()))?;
        let group_index = self
            .groups
            .iter()
            .position(|group| group.name == group_name)
            .ok_or_else(|| {
                DispatchError::Parser(format!("unknown command group '{group_name}'"))
            })?;
        let mut group = self.groups.swap_remove(group_index);

        let (command_name, command_matches) = group_matches.subcommand().ok_or_else(|| {
            DispatchError::Parser(format!("no command selected in group '{group_name}'"))
        })?;
        let command_index = group
            .commands
            .iter()
            .position(|command| command.name == command_name)
            .ok_or_else(|| {
                DispatchError::Parser(format!(
                    "unknown command '{command_name}' in group '{group_name}'"
                ))
            })?;
        let command = group.commands.swap_remove(command_index);

        tracing::debug!(group = %group_name, command = %command_name, "invoking handler");
        let args = to_parsed_args(&command, command_matches, self.aliases.clone());
        (command.handler)(args).await
    }
}

impl ParserHandle for ClapParser {
    fn group(
        &mut self,
        name: &str,
        description: &str,
        builder: &mut dyn FnMut(&mut dyn ParserHandle) -> Result<()>,
    ) -> Result<()> {
        self.groups.push(GroupNode {
            name: name.to_string(),
            description: description.to_string(),
            commands: Vec::new(),
        });
        self.current_group = Some(self.groups.len() - 1);
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
        let group_index = self.current_group.ok_or_else(|| {
            DispatchError::Parser(format!("command '{name}' registered outside a group"))
        })?;

        self.groups[group_index].commands.push(CommandNode {
            name: name.to_string(),
            description: description.to_string(),
            options: Vec::new(),
            handler,
        });
        self.current_command = Some(self.groups[group_index].commands.len() - 1);
        let result = options(self);
        self.current_command = None;
        result
    }

    fn option(&mut self, name: &str, spec: OptionSpec) {
        if let Some(alias) = spec.alias {
            self.aliases.insert(name, alias.to_string());
        }
        let def = OptionDef {
            name: name.to_string(),
            spec,
        };
        match (self.current_group, self.current_command) {
            (Some(group), Some(command)) => {
                self.groups[group].commands[command].options.push(def);
            }
            _ => {
                tracing::warn!(option = %def.name, "option registered outside a command; ignored");
            }
        }
    }

    fn demand(&mut self, count: usize) {
        self.subcommand_required = count >= 1;
    }

    fn usage(&mut self, text: &str) {
        self.usage = Some(text.to_string());
    }

    fn epilog(&mut self, text: &str) {
        self.epilog = Some(text.to_string());
    }

    fn help(&mut self, flag: &str) {
        // clap ships -h/--help; record the mapping in the alias table.
        self.aliases.insert("help", flag);
    }

    fn alias(&mut self, from: &str, to: &str) {
        self.aliases.insert(to, from);
    }

    fn strict(&mut self) {
        self.strict = true;
    }

    fn parsed_aliases(&self) -> AliasSet {
        self.aliases.clone()
    }
}

fn build_arg(name: &str, spec: &OptionSpec) -> Arg {
    let mut arg = Arg::new(name.to_string())
        .long(name.to_string())
        .help(spec.description.clone());
    if let Some(alias) = spec.alias {
        arg = arg.short(alias);
    }
    match spec.kind {
        OptionKind::Flag => arg = arg.action(ArgAction::SetTrue),
        OptionKind::Value => {
            arg = arg.action(ArgAction::Set);
            if spec.required {
                arg = arg.required(true);
            }
            if let Some(default) = &spec.default {
                let rendered = match default {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                arg = arg.default_value(rendered);
            }
        }
    }
    arg
}

fn to_parsed_args(command: &CommandNode, matches: &ArgMatches, aliases: AliasSet) -> ParsedArgs {
    let mut args = ParsedArgs::new().with_aliases(aliases);
    for option in &command.options {
        match option.spec.kind {
            OptionKind::Flag => {
                args.insert(
                    option.name.as_str(),
                    Value::Bool(matches.get_flag(&option.name)),
                );
            }
            OptionKind::Value => {
                if let Some(value) = matches.get_one::<String>(&option.name) {
                    args.insert(option.name.as_str(), Value::String(value.clone()));
                }
            }
        }
    }
    args
}

fn map_parse_error(err: clap::Error) -> Outcome {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            Ok(Value::Null)
        }
        _ => Err(DispatchError::Parser(err.to_string())),
    }
}
