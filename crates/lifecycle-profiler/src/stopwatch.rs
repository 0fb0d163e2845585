//! # Stopwatch Registry
//!
//! Named, transient start markers awaiting a matching stop.
//!
//! ## Semantics
//!
//! - One pending stopwatch per action name (last start wins, no stacking).
//! - A stopwatch is removed when it is taken by a stop.

use std::collections::HashMap;

/// A pending start marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopwatch {
    /// Start instant in nanoseconds since session start.
    pub started_at: i64,
    /// Memory in bytes when the stopwatch was started.
    pub memory: i64,
}

impl Stopwatch {
    /// Elapsed nanoseconds between the start and `now`, saturating at the
    /// `i64` bounds.
    #[must_use]
    pub fn elapsed_until(&self, now: i64) -> i64 {
        now.saturating_sub(self.started_at)
    }
}

/// Registry of pending stopwatches keyed by action name.
#[derive(Debug, Default)]
pub struct StopwatchRegistry {
    running: HashMap<String, Stopwatch>,
}

impl StopwatchRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the stopwatch for `action`.
    ///
    /// Any unmatched start for the same action is overwritten.
    pub fn start(&mut self, action: &str, started_at: i64, memory: i64) {
        self.running
            .insert(action.to_string(), Stopwatch { started_at, memory });
    }

    /// Remove and return the pending stopwatch for `action`, if any.
    pub fn take(&mut self, action: &str) -> Option<Stopwatch> {
        self.running.remove(action)
    }

    /// Check if a stopwatch is pending for `action`.
    #[must_use]
    pub fn is_running(&self, action: &str) -> bool {
        self.running.contains_key(action)
    }

    /// Number of pending stopwatches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.running.len()
    }

    /// Returns `true` if no stopwatch is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}
