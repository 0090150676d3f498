//! Registration binder: wires a registry into a parser's command tree.

use std::sync::Arc;

use crate::command::CommandDescriptor;
use crate::dispatch::Dispatcher;
use crate::error::{DispatchError, Result};
use crate::helper::Helper;
use crate::parser::{CommandHandler, ParserHandle};
use crate::registry::CommandRegistry;

/// Host-supplied help copy; the core owns no user-facing text.
#[derive(Debug, Clone, Default)]
pub struct HelpText {
    /// Usage banner.
    pub usage: String,

    /// Epilog shown after the command list.
    pub epilog: String,
}

impl HelpText {
    /// Create help copy from usage and epilog text.
    pub fn new(usage: impl Into<String>, epilog: impl Into<String>) -> Self {
        Self {
            usage: usage.into(),
            epilog: epilog.into(),
        }
    }
}

/// Bind every registry entry into the parser's command tree.
///
/// Calls the parser's group registration once per group in first-seen
/// order; inside each group, registers every command with an options
/// builder delegating to its register capability and a handler delegating
/// to the returned dispatcher. Finishes by applying the invocation-wide
/// parser configuration. Mutating the parser handle is the only externally
/// observable effect.
///
/// Any register failure aborts the whole pass: a misconfigured command must
/// not let the CLI start with a partially-wired tree.
pub fn bind(
    registry: Arc<CommandRegistry>,
    parser: &mut dyn ParserHandle,
    helper: Helper,
    text: &HelpText,
) -> Result<Dispatcher> {
    let dispatcher = Dispatcher::new(registry.clone(), helper);

    for group in registry.groups() {
        let commands: Vec<&CommandDescriptor> = registry
            .entries()
            .filter(|(_, descriptor)| descriptor.group == group)
            .map(|(_, descriptor)| descriptor)
            .collect();

        // The data model carries no group-level description; derive it
        // from the group's first command.
        let description = commands
            .first()
            .map(|descriptor| descriptor.description.clone())
            .filter(|description| !description.is_empty())
            .unwrap_or_else(|| format!("{group} commands"));

        tracing::debug!(group = %group, commands = commands.len(), "binding group");

        parser.group(group, &description, &mut |handle: &mut dyn ParserHandle| {
            for descriptor in &commands {
                let key = descriptor.key();

                let register = descriptor.register.clone();
                let register_key = key.clone();
                let mut options = move |handle: &mut dyn ParserHandle| {
                    register(&register_key, handle)
                        .map_err(|cause| DispatchError::binding(&register_key, cause.to_string()))
                };

                let handler_dispatcher = dispatcher.clone();
                let handler_key = key.clone();
                let handler: CommandHandler = Box::new(move |args| {
                    let dispatcher = handler_dispatcher.clone();
                    let key = handler_key.clone();
                    Box::pin(async move { dispatcher.dispatch(&key, args).await })
                });

                handle.command(&descriptor.name, &descriptor.description, &mut options, handler)?;
            }
            Ok(())
        })?;
    }

    parser.demand(1);
    parser.usage(&text.usage);
    parser.epilog(&text.epilog);
    parser.help("h");
    parser.alias("h", "help");
    parser.strict();

    dispatcher.mark_registered();
    Ok(dispatcher)
}
