//! Which bootstrap units to run.
//!
//! ## Configuration Shapes
//!
//! A bootstrap list read from configuration may take either shape:
//!
//! ```json
//! ["session", {"cache": [{"service": "cache.store"}, 300]}]
//! ```
//!
//! ```json
//! {"session": [], "cache": [{"service": "cache.store"}, 300]}
//! ```
//!
//! Bare strings are units without dependencies. Object entries map a unit
//! identifier to its constructor arguments; `{"service": "<id>"}` marks a
//! reference to another service. Declaration order is execution order.

use lifecycle_container::Argument;
use serde_json::Value;

use crate::domain::ApplicationError;
use crate::keys::DEFAULT_BOOTSTRAP_KEY;

/// A bootstrap unit to resolve, with its constructor arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSpec {
    /// Container identifier of the unit.
    pub identifier: String,
    /// Arguments passed to the container when resolving the unit.
    pub dependencies: Vec<Argument>,
}

impl UnitSpec {
    /// Unit without dependencies.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            dependencies: Vec::new(),
        }
    }

    /// Unit with constructor arguments.
    pub fn with_dependencies(identifier: impl Into<String>, dependencies: Vec<Argument>) -> Self {
        Self {
            identifier: identifier.into(),
            dependencies,
        }
    }

    /// Parse a bootstrap list read from configuration under `key`.
    ///
    /// `null` is an empty list.
    pub fn parse_list(key: &str, value: &Value) -> Result<Vec<Self>, ApplicationError> {
        let invalid = |reason: String| ApplicationError::InvalidBootstrapList {
            key: key.to_string(),
            reason,
        };

        match value {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::String(identifier) => Ok(Self::new(identifier.clone())),
                    Value::Object(map) if map.len() == 1 => {
                        let (identifier, deps) = map
                            .iter()
                            .next()
                            .ok_or_else(|| invalid(format!("entry {index} is empty")))?;
                        Self::from_entry(identifier, deps).map_err(invalid)
                    }
                    other => Err(invalid(format!(
                        "entry {index} must be an identifier or a single-key object, got {other}"
                    ))),
                })
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(identifier, deps)| Self::from_entry(identifier, deps).map_err(invalid))
                .collect(),
            other => Err(invalid(format!("expected a list or a map, got {other}"))),
        }
    }

    fn from_entry(identifier: &str, deps: &Value) -> Result<Self, String> {
        let dependencies = match deps {
            Value::Null => Vec::new(),
            Value::Array(args) => args.iter().map(Argument::from_config).collect(),
            other => {
                return Err(format!(
                    "dependencies of [{identifier}] must be a list, got {other}"
                ))
            }
        };
        Ok(Self::with_dependencies(identifier, dependencies))
    }
}

impl From<&str> for UnitSpec {
    fn from(identifier: &str) -> Self {
        Self::new(identifier)
    }
}

impl From<String> for UnitSpec {
    fn from(identifier: String) -> Self {
        Self::new(identifier)
    }
}

/// Source of the bootstrap unit list.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapSpec {
    /// Run nothing; the application is still marked bootstrapped.
    Skip,
    /// Read the list from configuration under this key. A missing key is an
    /// empty list.
    ConfigKey(String),
    /// Run exactly these units.
    Units(Vec<UnitSpec>),
}

impl Default for BootstrapSpec {
    fn default() -> Self {
        Self::ConfigKey(DEFAULT_BOOTSTRAP_KEY.to_string())
    }
}

impl From<&str> for BootstrapSpec {
    fn from(key: &str) -> Self {
        Self::ConfigKey(key.to_string())
    }
}

impl From<String> for BootstrapSpec {
    fn from(key: String) -> Self {
        Self::ConfigKey(key)
    }
}

impl From<Vec<UnitSpec>> for BootstrapSpec {
    fn from(units: Vec<UnitSpec>) -> Self {
        Self::Units(units)
    }
}

impl<T: Into<BootstrapSpec>> From<Option<T>> for BootstrapSpec {
    fn from(spec: Option<T>) -> Self {
        spec.map_or(Self::Skip, Into::into)
    }
}
