//! Dispatch framework error types.

use thiserror::Error;

use crate::dispatch::InvocationState;

/// Errors surfaced by registry construction, binding, and dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A group or command spec is malformed.
    #[error("Invalid command spec: {0}")]
    InvalidSpec(String),

    /// Two commands produced the same composite key.
    #[error("Duplicate command: {0}")]
    DuplicateCommand(String),

    /// A register capability failed while wiring the parser.
    #[error("Failed to bind command '{key}': {message}")]
    Binding { key: String, message: String },

    /// The parser resolved a command the registry does not hold.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// A run capability rejected.
    #[error("Command '{key}' failed: {source}")]
    CommandFailed {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// A second dispatch was attempted on a finished invocation.
    #[error("Cannot dispatch '{key}': invocation is already {state}")]
    InvocationComplete { key: String, state: InvocationState },

    /// The parser adapter failed to parse the invocation.
    #[error("Parse error: {0}")]
    Parser(String),
}

impl DispatchError {
    /// Create an invalid-spec error.
    pub fn invalid_spec(message: impl Into<String>) -> Self {
        Self::InvalidSpec(message.into())
    }

    /// Create a binding error for a composite key.
    pub fn binding(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Binding {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a command failure tagged with a composite key.
    pub fn command_failed(key: impl Into<String>, source: anyhow::Error) -> Self {
        Self::CommandFailed {
            key: key.into(),
            source,
        }
    }

    /// The composite key of the command this error concerns, if any.
    pub fn composite_key(&self) -> Option<&str> {
        match self {
            Self::DuplicateCommand(key)
            | Self::CommandNotFound(key)
            | Self::Binding { key, .. }
            | Self::CommandFailed { key, .. }
            | Self::InvocationComplete { key, .. } => Some(key),
            Self::InvalidSpec(_) | Self::Parser(_) => None,
        }
    }
}

/// Result type alias for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DispatchError::DuplicateCommand("build-app".to_string());
        assert_eq!(err.to_string(), "Duplicate command: build-app");

        let err = DispatchError::binding("build-app", "option clash");
        assert_eq!(
            err.to_string(),
            "Failed to bind command 'build-app': option clash"
        );
    }

    #[test]
    fn test_command_failed_carries_the_cause() {
        let err = DispatchError::command_failed("build-app", anyhow::anyhow!("exploded"));
        assert_eq!(err.to_string(), "Command 'build-app' failed: exploded");
    }

    #[test]
    fn test_composite_key_accessor() {
        let err = DispatchError::CommandNotFound("build-app".to_string());
        assert_eq!(err.composite_key(), Some("build-app"));

        let err = DispatchError::invalid_spec("empty group name");
        assert_eq!(err.composite_key(), None);

        let err = DispatchError::InvocationComplete {
            key: "build-app".to_string(),
            state: InvocationState::Succeeded,
        };
        assert_eq!(err.composite_key(), Some("build-app"));
    }
}
