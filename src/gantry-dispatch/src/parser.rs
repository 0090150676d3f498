//! The parser seam: the capabilities this crate consumes from an external
//! argument parser.
//!
//! The core never owns a parser. The binder mutates a [`ParserHandle`]
//! during the synchronous binding phase; at invocation time the parser
//! resolves a group+command and invokes the stored [`CommandHandler`].
//! Production code binds against a real parser adapter; tests substitute a
//! recording stub.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alias::AliasSet;
use crate::args::ParsedArgs;
use crate::dispatch::Outcome;
use crate::error::Result;

/// Future returned by a stored command handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Outcome> + Send>>;

/// Dispatch entry point stored by the parser for one command node.
pub type CommandHandler = Box<dyn Fn(ParsedArgs) -> HandlerFuture + Send + Sync>;

/// Object-safe model of the consumed argument parser.
///
/// Configuration calls impose no interpretation on the handle beyond
/// chaining; implementations are free to ignore calls they cannot express.
pub trait ParserHandle {
    /// Register a group node. The builder is invoked exactly once with the
    /// handle commands of this group register against.
    fn group(
        &mut self,
        name: &str,
        description: &str,
        builder: &mut dyn FnMut(&mut dyn ParserHandle) -> Result<()>,
    ) -> Result<()>;

    /// Register a command node under the current group. The options builder
    /// is invoked exactly once to attach flags; the handler is stored as the
    /// dispatch entry point for this node.
    fn command(
        &mut self,
        name: &str,
        description: &str,
        options: &mut dyn FnMut(&mut dyn ParserHandle) -> Result<()>,
        handler: CommandHandler,
    ) -> Result<()>;

    /// Attach one option to the current scope.
    fn option(&mut self, name: &str, spec: OptionSpec);

    /// Require at least `count` positional arguments.
    fn demand(&mut self, count: usize);

    /// Set the usage banner.
    fn usage(&mut self, text: &str);

    /// Set the epilog shown after help text.
    fn epilog(&mut self, text: &str);

    /// Name the help flag.
    fn help(&mut self, flag: &str);

    /// Declare `from` as an alias of the long name `to`.
    fn alias(&mut self, from: &str, to: &str);

    /// Reject unknown arguments and commands.
    fn strict(&mut self);

    /// The alias table the parser decided on; empty before parsing.
    fn parsed_aliases(&self) -> AliasSet;
}

/// Spec for one option attached during registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Help description.
    pub description: String,

    /// Single-character alias, if any.
    pub alias: Option<char>,

    /// Flag or value-taking option.
    pub kind: OptionKind,

    /// Whether the option must be supplied.
    pub required: bool,

    /// Default value when absent.
    pub default: Option<Value>,
}

impl OptionSpec {
    /// A boolean flag.
    pub fn flag(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            alias: None,
            kind: OptionKind::Flag,
            required: false,
            default: None,
        }
    }

    /// A value-taking option.
    pub fn value(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            alias: None,
            kind: OptionKind::Value,
            required: false,
            default: None,
        }
    }

    /// Set the single-character alias.
    pub fn with_alias(mut self, alias: char) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Mark the option required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the default value.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Kind of option: presence flag or value-taking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Boolean presence flag.
    Flag,
    /// Takes one value.
    Value,
}

/// Parser handle that accepts every call and records nothing. Useful as a
/// stand-in where binding effects are irrelevant.
#[derive(Debug, Default)]
pub struct NoopParser;

impl ParserHandle for NoopParser {
    fn group(
        &mut self,
        _name: &str,
        _description: &str,
        builder: &mut dyn FnMut(&mut dyn ParserHandle) -> Result<()>,
    ) -> Result<()> {
        builder(self)
    }

    fn command(
        &mut self,
        _name: &str,
        _description: &str,
        options: &mut dyn FnMut(&mut dyn ParserHandle) -> Result<()>,
        _handler: CommandHandler,
    ) -> Result<()> {
        options(self)
    }

    fn option(&mut self, _name: &str, _spec: OptionSpec) {}
    fn demand(&mut self, _count: usize) {}
    fn usage(&mut self, _text: &str) {}
    fn epilog(&mut self, _text: &str) {}
    fn help(&mut self, _flag: &str) {}
    fn alias(&mut self, _from: &str, _to: &str) {}
    fn strict(&mut self) {}

    fn parsed_aliases(&self) -> AliasSet {
        AliasSet::new()
    }
}
