//! Dispatcher and the per-invocation lifecycle.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde_json::Value;

use crate::args::ParsedArgs;
use crate::command::CommandDescriptor;
use crate::error::DispatchError;
use crate::helper::Helper;
use crate::registry::CommandRegistry;

/// Result of dispatching one command: the run capability's value, or a
/// failure tagged with the composite key.
pub type Outcome = std::result::Result<Value, DispatchError>;

/// Lifecycle of one process invocation.
///
/// `Idle → Registered → Dispatching → {Succeeded | Failed}`; terminal
/// states are never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InvocationState {
    /// Nothing bound yet.
    Idle = 0,
    /// All groups and commands bound without error.
    Registered = 1,
    /// A run capability is in flight.
    Dispatching = 2,
    /// The run resolved.
    Succeeded = 3,
    /// Binding failed, lookup missed, or the run rejected.
    Failed = 4,
}

impl InvocationState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Registered,
            2 => Self::Dispatching,
            3 => Self::Succeeded,
            _ => Self::Failed,
        }
    }

    /// Whether no further transition can occur.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Registered => "registered",
            Self::Dispatching => "dispatching",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Resolves composite keys against the registry and runs the selected
/// command.
///
/// Clones share the registry, helper, and invocation state; exactly one
/// `run` executes per invocation, guarded by the state machine. There is no
/// cancellation and no retry: once a run starts, the invocation runs to
/// completion.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    helper: Helper,
    state: Arc<AtomicU8>,
}

impl Dispatcher {
    /// Create an idle dispatcher over a registry.
    pub fn new(registry: Arc<CommandRegistry>, helper: Helper) -> Self {
        Self {
            registry,
            helper,
            state: Arc::new(AtomicU8::new(InvocationState::Idle as u8)),
        }
    }

    /// Current invocation state.
    pub fn state(&self) -> InvocationState {
        InvocationState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// The registry this dispatcher resolves against.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub(crate) fn mark_registered(&self) {
        self.set_state(InvocationState::Registered);
    }

    fn set_state(&self, state: InvocationState) {
        self.state.store(state as u8, Ordering::SeqCst);
    }

    /// Resolve a composite key and run the command with the parsed
    /// arguments.
    ///
    /// Refuses to start once the invocation is dispatching or finished: a
    /// second dispatch would be a retry or a concurrent run, both excluded
    /// from the lifecycle.
    pub async fn dispatch(&self, key: &str, args: ParsedArgs) -> Outcome {
        let state = self.state();
        if state.is_terminal() || state == InvocationState::Dispatching {
            return Err(DispatchError::InvocationComplete {
                key: key.to_string(),
                state,
            });
        }
        self.set_state(InvocationState::Dispatching);

        let Some(descriptor) = self.registry.get(key) else {
            self.set_state(InvocationState::Failed);
            return Err(DispatchError::CommandNotFound(key.to_string()));
        };

        let outcome = run_descriptor(descriptor, self.helper.clone(), args).await;
        self.set_state(if outcome.is_ok() {
            InvocationState::Succeeded
        } else {
            InvocationState::Failed
        });
        outcome
    }
}

/// Invoke a descriptor's run capability and normalize the result.
///
/// Failures are tagged with the descriptor's composite key so the top-level
/// reporter can identify which command failed. No retry, no timeout.
pub async fn run_descriptor(
    descriptor: &CommandDescriptor,
    helper: Helper,
    args: ParsedArgs,
) -> Outcome {
    let key = descriptor.key();
    tracing::debug!(key = %key, "dispatching command");

    match (descriptor.run)(helper, args).await {
        Ok(value) => {
            tracing::debug!(key = %key, "command succeeded");
            Ok(value)
        }
        Err(cause) => {
            tracing::warn!(key = %key, error = %cause, "command failed");
            Err(DispatchError::command_failed(key, cause))
        }
    }
}
