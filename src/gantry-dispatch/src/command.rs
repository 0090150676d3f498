//! Command descriptors and the group/command input model.
//!
//! A command is plain data plus two function-valued capabilities: `register`
//! attaches options to the parser during binding, `run` is the executable
//! behavior. There is no command trait to implement; the binder treats every
//! descriptor uniformly by invoking these fields.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use crate::args::ParsedArgs;
use crate::helper::Helper;
use crate::parser::ParserHandle;

/// Future returned by a run capability.
pub type RunFuture = Pin<Box<dyn Future<Output = anyhow::Result<Value>> + Send>>;

/// Register capability: invoked once during binding with the command's
/// composite key and the parser handle to attach options to.
pub type RegisterFn = Arc<dyn Fn(&str, &mut dyn ParserHandle) -> anyhow::Result<()> + Send + Sync>;

/// Run capability: invoked with the helper context and the parsed arguments.
pub type RunFn = Arc<dyn Fn(Helper, ParsedArgs) -> RunFuture + Send + Sync>;

/// Eject capability: returns an opaque payload for commands that support
/// being materialized outside the CLI.
pub type EjectFn = Arc<dyn Fn() -> anyhow::Result<Value> + Send + Sync>;

/// Compute the composite key for a (group, name) pair.
///
/// The key is the registry's lookup key and the correlation token passed to
/// register capabilities and carried on dispatch failures.
pub fn composite_key(group: &str, name: &str) -> String {
    format!("{group}-{name}")
}

/// Metadata and behavior for one invocable command.
#[derive(Clone)]
pub struct CommandDescriptor {
    /// Logical namespace the command lives under.
    pub group: String,

    /// Command name, unique within its group.
    pub name: String,

    /// Description shown in help text.
    pub description: String,

    /// Opaque filesystem/module locator, passed through untouched.
    pub path: Option<String>,

    /// Option-registration capability.
    pub register: RegisterFn,

    /// Executable behavior.
    pub run: RunFn,

    /// Ejection capability, absent for most commands.
    pub eject: Option<EjectFn>,
}

impl CommandDescriptor {
    /// The composite key for this descriptor.
    pub fn key(&self) -> String {
        composite_key(&self.group, &self.name)
    }

    /// Whether the command supports ejection.
    pub fn can_eject(&self) -> bool {
        self.eject.is_some()
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("group", &self.group)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("path", &self.path)
            .field("eject", &self.eject.is_some())
            .finish_non_exhaustive()
    }
}

/// One group of commands, in discovery order.
pub struct GroupSpec {
    /// Group name.
    pub name: String,

    /// Commands in listed order.
    pub commands: Vec<CommandSpec>,
}

impl GroupSpec {
    /// Create an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    /// Append a command to the group.
    pub fn with_command(mut self, command: CommandSpec) -> Self {
        self.commands.push(command);
        self
    }
}

/// Input spec for one command, consumed by [`CommandRegistry::build`].
///
/// [`CommandRegistry::build`]: crate::registry::CommandRegistry::build
pub struct CommandSpec {
    /// Command name.
    pub name: String,

    /// Help description.
    pub description: Option<String>,

    /// Opaque locator.
    pub path: Option<String>,

    /// Option-registration capability; a spec without one gets a no-op
    /// register (commands without options are legal).
    pub register: Option<RegisterFn>,

    /// Executable behavior.
    pub run: RunFn,

    /// Ejection capability.
    pub eject: Option<EjectFn>,
}

impl CommandSpec {
    /// Create a spec from a name and an async run capability.
    pub fn new<F, Fut>(name: impl Into<String>, run: F) -> Self
    where
        F: Fn(Helper, ParsedArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Value>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            path: None,
            register: None,
            run: Arc::new(move |helper, args| Box::pin(run(helper, args))),
            eject: None,
        }
    }

    /// Set the help description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the opaque locator.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the option-registration capability.
    pub fn with_register<F>(mut self, register: F) -> Self
    where
        F: Fn(&str, &mut dyn ParserHandle) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.register = Some(Arc::new(register));
        self
    }

    /// Set the ejection capability.
    pub fn with_eject<F>(mut self, eject: F) -> Self
    where
        F: Fn() -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.eject = Some(Arc::new(eject));
        self
    }

    /// Turn the spec into a descriptor under the given group.
    pub(crate) fn into_descriptor(self, group: &str) -> CommandDescriptor {
        CommandDescriptor {
            group: group.to_string(),
            name: self.name,
            description: self.description.unwrap_or_default(),
            path: self.path,
            register: self.register.unwrap_or_else(|| Arc::new(|_, _| Ok(()))),
            run: self.run,
            eject: self.eject,
        }
    }
}
