//! Container error types.

use thiserror::Error;

/// Errors raised while resolving services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    /// Nothing is bound or registered under the identifier.
    #[error("Service not found: {id}")]
    NotFound { id: String },

    /// A binding exists but its factory failed.
    #[error("Failed to resolve [{id}]: {reason}")]
    Resolution { id: String, reason: String },

    /// The resolved instance is not of the requested type.
    #[error("Service [{id}] is not an instance of {expected}")]
    TypeMismatch { id: String, expected: &'static str },
}

impl ContainerError {
    /// Shorthand for [`ContainerError::NotFound`].
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Shorthand for [`ContainerError::Resolution`].
    pub fn resolution(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Identifier the failed resolution was about.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::NotFound { id } | Self::Resolution { id, .. } | Self::TypeMismatch { id, .. } => {
                id
            }
        }
    }
}
