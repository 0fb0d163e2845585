//! Application error types.

use lifecycle_container::ContainerError;
use thiserror::Error;

use super::state::ApplicationState;

/// Errors raised by lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplicationError {
    /// Resolution failure, propagated unchanged from the container.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// A resolved bootstrap unit does not provide the bootstrap capability.
    #[error("Bootstrapper [{identifier}] should be an instance of BootstrapUnit")]
    Configuration {
        /// Identifier the unit was resolved from.
        identifier: String,
    },

    /// The configured bootstrap list cannot be interpreted.
    #[error("Invalid bootstrap list under [{key}]: {reason}")]
    InvalidBootstrapList {
        /// Configuration key the list was read from.
        key: String,
        /// What made the list unreadable.
        reason: String,
    },

    /// The operation is not allowed in the current state.
    #[error("Cannot {operation} application while {from}")]
    InvalidTransition {
        /// State at the time of the call.
        from: ApplicationState,
        /// Rejected operation.
        operation: &'static str,
    },

    /// A bootstrap unit or kernel reported a failure.
    #[error("[{identifier}] failed: {message}")]
    Unit {
        /// Failing unit or kernel.
        identifier: String,
        /// Failure description.
        message: String,
    },
}

impl ApplicationError {
    /// Shorthand for [`ApplicationError::Unit`].
    pub fn unit(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unit {
            identifier: identifier.into(),
            message: message.into(),
        }
    }
}
