//! Constructor arguments passed through [`Container::make`](crate::Container::make).
//!
//! An argument is either a literal JSON value or a reference to another
//! service. Service references are resolved by the container before the
//! factory runs, so a factory only ever sees [`ResolvedArgument`]s.

use std::any::Any;
use std::sync::Arc;

use serde_json::Value;

use crate::container::Instance;

/// Key marking a service reference inside a configuration value:
/// `{"service": "cache.store"}`.
pub const SERVICE_REFERENCE_KEY: &str = "service";

/// Unresolved constructor argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Literal value.
    Value(Value),
    /// Identifier of a service to resolve through the container.
    Service(String),
}

impl Argument {
    /// Literal argument.
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Service reference.
    pub fn service(id: impl Into<String>) -> Self {
        Self::Service(id.into())
    }

    /// Interpret a configuration value.
    ///
    /// A single-key object `{"service": "<id>"}` becomes a service
    /// reference; anything else is passed through as a literal.
    #[must_use]
    pub fn from_config(value: &Value) -> Self {
        if let Value::Object(map) = value {
            if map.len() == 1 {
                if let Some(Value::String(id)) = map.get(SERVICE_REFERENCE_KEY) {
                    return Self::Service(id.clone());
                }
            }
        }
        Self::Value(value.clone())
    }
}

/// Constructor argument after service references were resolved.
#[derive(Clone)]
pub enum ResolvedArgument {
    /// Literal value.
    Value(Value),
    /// Resolved service instance.
    Service(Instance),
}

impl ResolvedArgument {
    /// The literal value, if this argument is one.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Service(_) => None,
        }
    }

    /// The literal value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// The resolved service, downcast to `T`.
    #[must_use]
    pub fn as_service<T: Any + Send + Sync + Clone>(&self) -> Option<T> {
        match self {
            Self::Service(instance) => instance.downcast_ref::<T>().cloned(),
            Self::Value(_) => None,
        }
    }

    /// The resolved service as a shared concrete instance.
    #[must_use]
    pub fn as_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Self::Service(instance) => Arc::clone(instance).downcast::<T>().ok(),
            Self::Value(_) => None,
        }
    }
}

impl std::fmt::Debug for ResolvedArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Service(_) => f.debug_tuple("Service").finish_non_exhaustive(),
        }
    }
}
