//! In-memory configuration store.
//!
//! Values live in an insertion-ordered JSON map. `get` accepts dotted paths
//! (`"cache.ttl"`) that walk nested objects when no top-level key matches.

use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;
use serde_json::{Map, Value};
use tracing::debug;

use crate::ports::Config;

/// Thread-safe configuration store backed by a JSON map.
#[derive(Debug, Default)]
pub struct MemoryConfig {
    values: RwLock<Map<String, Value>>,
    profile: RwLock<Option<String>>,
    loads: AtomicUsize,
}

impl MemoryConfig {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `values`.
    #[must_use]
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self {
            values: RwLock::new(values),
            ..Self::default()
        }
    }

    /// Create a store from a JSON object. Any other value yields an empty
    /// store.
    #[must_use]
    pub fn from_value(values: Value) -> Self {
        match values {
            Value::Object(map) => Self::from_map(map),
            _ => Self::new(),
        }
    }

    /// How many times `load` actually loaded.
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Profile passed to the last effective `load`.
    #[must_use]
    pub fn profile(&self) -> Option<String> {
        self.profile.read().clone()
    }

    fn lookup(values: &Map<String, Value>, key: &str) -> Option<Value> {
        if let Some(value) = values.get(key) {
            return Some(value.clone());
        }

        let mut segments = key.split('.');
        let mut current = values.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current.clone())
    }
}

impl Config for MemoryConfig {
    fn load(&self, profile: Option<&str>, force: bool) -> bool {
        if self.loads() > 0 && !force {
            return false;
        }

        *self.profile.write() = profile.map(str::to_string);
        let loads = self.loads.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("[Config] Loaded (profile: {:?}, loads: {})", profile, loads);
        true
    }

    fn get(&self, key: &str) -> Option<Value> {
        Self::lookup(&self.values.read(), key)
    }

    fn set(&self, key: &str, value: Value) {
        self.values.write().insert(key.to_string(), value);
    }
}
