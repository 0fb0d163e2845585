//! # Profiling Session
//!
//! Owns the ordered profiling log, the stopwatch registry and the `enabled`
//! flag for one lifecycle session.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Disabled session appends nothing | `start()` / `stop()` early return |
//! | Toggling never drops entries | `enable()` only flips the flag |
//! | Reported entries ordered by timestamp | `ProfilingLog::sorted()` stable sort |
//!
//! A session is not shared between concurrent units of work; hosts that
//! serve overlapping requests create one session per request.

use tracing::trace;

use crate::entry::{ProfilingEntry, StackFrame};
use crate::ports::{MemoryProbe, MonotonicTimeSource, ProcessMemory, TimeSource};
use crate::stacktrace::capture as capture_stack;
use crate::stopwatch::StopwatchRegistry;

/// Append-only collection of profiling entries.
#[derive(Debug, Default)]
pub struct ProfilingLog {
    entries: Vec<ProfilingEntry>,
}

impl ProfilingLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: ProfilingEntry) {
        self.entries.push(entry);
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn as_recorded(&self) -> &[ProfilingEntry] {
        &self.entries
    }

    /// Entries sorted ascending by timestamp.
    ///
    /// Timestamps may be supplied by callers, so insertion order does not
    /// imply timestamp order. The sort is stable: entries sharing a
    /// timestamp keep their insertion order.
    #[must_use]
    pub fn sorted(&self) -> Vec<ProfilingEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|entry| entry.timestamp);
        entries
    }

    /// Number of recorded entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Timing and memory instrumentation for one lifecycle session.
pub struct ProfilingSession {
    log: ProfilingLog,
    stopwatches: StopwatchRegistry,
    enabled: bool,
    time: Box<dyn TimeSource>,
    memory: Box<dyn MemoryProbe>,
}

impl ProfilingSession {
    /// Create a session anchored at `time`'s origin, measuring process memory.
    pub fn new(time: impl TimeSource + 'static, enabled: bool) -> Self {
        Self::with_sources(time, ProcessMemory::new(), enabled)
    }

    /// Create a session with explicit time and memory sources.
    pub fn with_sources(
        time: impl TimeSource + 'static,
        memory: impl MemoryProbe + 'static,
        enabled: bool,
    ) -> Self {
        Self {
            log: ProfilingLog::new(),
            stopwatches: StopwatchRegistry::new(),
            enabled,
            time: Box::new(time),
            memory: Box::new(memory),
        }
    }

    /// Start the stopwatch for `action`.
    ///
    /// `timestamp` and `memory` default to the current readings.
    pub fn start(&mut self, action: &str, timestamp: Option<i64>, memory: Option<i64>) {
        if !self.enabled {
            return;
        }

        let started_at = timestamp.unwrap_or_else(|| self.time.now_ns());
        let memory = memory.unwrap_or_else(|| self.memory.current_bytes());
        self.stopwatches.start(action, started_at, memory);
    }

    /// Stop the stopwatch for `action` and append an entry.
    ///
    /// Stopping an action that was never started is valid and records a
    /// marker entry without duration.
    pub fn stop(
        &mut self,
        action: &str,
        timestamp: Option<i64>,
        memory: Option<i64>,
        stacktrace: Option<Vec<StackFrame>>,
    ) {
        if !self.enabled {
            return;
        }

        let now = self.time.now_ns();
        let duration = self
            .stopwatches
            .take(action)
            .map(|watch| watch.elapsed_until(now));

        let entry = ProfilingEntry {
            action: action.to_string(),
            timestamp: timestamp.unwrap_or(now),
            duration,
            memory: memory.unwrap_or_else(|| self.memory.current_bytes()),
            stacktrace: stacktrace.or_else(capture_stack),
        };

        trace!(
            action = %entry.action,
            timestamp = entry.timestamp,
            duration = ?entry.duration,
            memory = entry.memory,
            "[Profiler] entry recorded"
        );

        self.log.push(entry);
    }

    /// Enable or disable recording. Existing entries are kept either way.
    pub fn enable(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the session is recording.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Recorded entries ordered by timestamp, or `None` while disabled.
    #[must_use]
    pub fn entries(&self) -> Option<Vec<ProfilingEntry>> {
        self.enabled.then(|| self.log.sorted())
    }

    /// Number of stopwatches still waiting for a stop.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.stopwatches.len()
    }
}

impl Default for ProfilingSession {
    fn default() -> Self {
        Self::new(MonotonicTimeSource::default(), false)
    }
}

impl std::fmt::Debug for ProfilingSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfilingSession")
            .field("enabled", &self.enabled)
            .field("entries", &self.log.len())
            .field("pending", &self.stopwatches.len())
            .finish()
    }
}
