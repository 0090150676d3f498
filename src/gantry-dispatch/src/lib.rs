//! # Gantry Dispatch
//!
//! Command registry and dispatch engine for the gantry CLI framework.
//!
//! Hosts describe commands as data: each command is a [`CommandDescriptor`]
//! holding metadata plus two function-valued capabilities, `register`
//! (attach options to the parser) and `run` (the executable behavior).
//! Descriptors are collected into an insertion-ordered [`CommandRegistry`]
//! keyed by the composite `group-name` key, bound into an external argument
//! parser through the [`ParserHandle`] seam, and dispatched by a
//! [`Dispatcher`] that runs exactly one command per process invocation and
//! reports an explicit success-or-failure [`Outcome`].
//!
//! ## Example
//!
//! ```rust
//! use gantry_dispatch::{CommandRegistry, CommandSpec, GroupSpec};
//!
//! let groups = vec![GroupSpec::new("build").with_command(
//!     CommandSpec::new("app", |_helper, _args| async {
//!         Ok(serde_json::json!("built"))
//!     })
//!     .with_description("Build the application"),
//! )];
//!
//! let registry = CommandRegistry::build(groups).unwrap();
//! assert!(registry.contains("build-app"));
//! ```
//!
//! Binding against a real parser and running one invocation is the host's
//! job; see the `gantry-clap` adapter and the `gantry` binary.

pub mod alias;
pub mod args;
pub mod binder;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod helper;
pub mod parser;
pub mod registry;

// Re-exports for convenience
pub use alias::AliasSet;
pub use args::ParsedArgs;
pub use binder::{HelpText, bind};
pub use command::{
    CommandDescriptor, CommandSpec, EjectFn, GroupSpec, RegisterFn, RunFn, RunFuture,
    composite_key,
};
pub use dispatch::{Dispatcher, InvocationState, Outcome, run_descriptor};
pub use error::{DispatchError, Result};
pub use helper::Helper;
pub use parser::{CommandHandler, HandlerFuture, NoopParser, OptionKind, OptionSpec, ParserHandle};
pub use registry::CommandRegistry;
