//! # In-Memory Container
//!
//! Reference implementation of the [`Container`] capability used by the
//! runtime binary and the test suites.
//!
//! ## Resolution Order
//!
//! 1. Registered instances (including cached singletons)
//! 2. Bindings: arguments are resolved first, then the factory runs
//!
//! No lock is held while a factory runs, so factories may resolve other
//! services through the container they receive.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::argument::{Argument, ResolvedArgument};
use crate::container::{Container, Factory, Instance};
use crate::error::ContainerError;

#[derive(Clone)]
enum Binding {
    Transient(Factory),
    Shared(Factory),
}

/// Thread-safe, map-backed container.
#[derive(Default)]
pub struct InMemoryContainer {
    instances: RwLock<HashMap<String, Instance>>,
    bindings: RwLock<HashMap<String, Binding>>,
}

impl InMemoryContainer {
    /// Create an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifiers of registered instances.
    #[must_use]
    pub fn instance_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.instances.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn resolve_argument(&self, arg: &Argument) -> Result<ResolvedArgument, ContainerError> {
        match arg {
            Argument::Value(value) => Ok(ResolvedArgument::Value(value.clone())),
            Argument::Service(id) => Ok(ResolvedArgument::Service(self.make(id, &[])?)),
        }
    }

    fn register_binding(&self, id: &str, binding: Binding) {
        self.instances.write().remove(id);
        self.bindings.write().insert(id.to_string(), binding);
    }
}

impl Container for InMemoryContainer {
    fn make(&self, id: &str, args: &[Argument]) -> Result<Instance, ContainerError> {
        if let Some(instance) = self.instances.read().get(id).cloned() {
            return Ok(instance);
        }

        let binding = self
            .bindings
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| ContainerError::not_found(id))?;

        let resolved = args
            .iter()
            .map(|arg| self.resolve_argument(arg))
            .collect::<Result<Vec<_>, _>>()?;

        match binding {
            Binding::Transient(factory) => factory(self as &dyn Container, &resolved),
            Binding::Shared(factory) => {
                let instance = factory(self as &dyn Container, &resolved)?;
                debug!("[Container] Caching shared instance: {}", id);
                self.instances
                    .write()
                    .insert(id.to_string(), instance.clone());
                Ok(instance)
            }
        }
    }

    fn instance(&self, key: &str, value: Instance) {
        debug!("[Container] Registering instance: {}", key);
        self.instances.write().insert(key.to_string(), value);
    }

    fn has(&self, id: &str) -> bool {
        self.instances.read().contains_key(id) || self.bindings.read().contains_key(id)
    }

    fn singleton(&self, id: &str, factory: Factory) {
        self.register_binding(id, Binding::Shared(factory));
    }

    fn bind(&self, id: &str, factory: Factory) {
        self.register_binding(id, Binding::Transient(factory));
    }
}

impl std::fmt::Debug for InMemoryContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bindings: Vec<String> = self.bindings.read().keys().cloned().collect();
        bindings.sort();
        f.debug_struct("InMemoryContainer")
            .field("instances", &self.instance_keys())
            .field("bindings", &bindings)
            .finish()
    }
}
