//! Profiling entry value objects.

use serde::{Deserialize, Serialize};

/// A single frame of a captured call stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackFrame {
    /// Demangled symbol name.
    pub function: String,
    /// `file:line:column` when debug info is available.
    pub location: Option<String>,
}

impl StackFrame {
    /// Create a frame without location information.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            location: None,
        }
    }

    /// Attach a source location.
    #[must_use]
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// One recorded timing/memory checkpoint.
///
/// Entries are immutable once appended to a [`ProfilingLog`](crate::ProfilingLog).
/// `timestamp` is measured in nanoseconds since the session start instant;
/// `duration` is absent for marker events (a stop without a matching start).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilingEntry {
    /// Action name, e.g. `app.bootstrap`.
    pub action: String,
    /// Nanoseconds since session start.
    pub timestamp: i64,
    /// Nanoseconds between the matching start and this stop.
    pub duration: Option<i64>,
    /// Process memory in bytes at the time of the stop.
    pub memory: i64,
    /// Call stack at the stop site, profiler frames excluded.
    pub stacktrace: Option<Vec<StackFrame>>,
}

impl ProfilingEntry {
    /// True for entries produced by a stop without a matching start.
    #[must_use]
    pub fn is_marker(&self) -> bool {
        self.duration.is_none()
    }
}
