//! Outbound ports of the profiling session.
//!
//! Time and memory are abstracted so that sessions can be driven by
//! deterministic sources in tests.

use std::time::Instant;

use parking_lot::Mutex;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// Source of the session-relative "now".
pub trait TimeSource: Send + Sync {
    /// Nanoseconds elapsed since the session start instant.
    fn now_ns(&self) -> i64;
}

/// Monotonic time source anchored at a start instant.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTimeSource {
    origin: Instant,
}

impl MonotonicTimeSource {
    /// Anchor the time source at `origin`.
    #[must_use]
    pub fn new(origin: Instant) -> Self {
        Self { origin }
    }

    /// The instant timestamps are measured from.
    #[must_use]
    pub fn origin(&self) -> Instant {
        self.origin
    }
}

impl Default for MonotonicTimeSource {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl TimeSource for MonotonicTimeSource {
    fn now_ns(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }
}

/// Source of the current memory reading.
pub trait MemoryProbe: Send + Sync {
    /// Current memory usage in bytes.
    fn current_bytes(&self) -> i64;
}

/// Resident memory of the current process, read through `sysinfo`.
///
/// Reports `0` when the platform cannot identify the current process.
pub struct ProcessMemory {
    system: Mutex<System>,
    pid: Option<Pid>,
}

impl ProcessMemory {
    /// Create a probe for the current process.
    #[must_use]
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
            pid: sysinfo::get_current_pid().ok(),
        }
    }
}

impl Default for ProcessMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessMemory").field("pid", &self.pid).finish()
    }
}

impl MemoryProbe for ProcessMemory {
    fn current_bytes(&self) -> i64 {
        let Some(pid) = self.pid else {
            return 0;
        };

        let mut system = self.system.lock();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::new().with_memory(),
        );

        system
            .process(pid)
            .map(|process| i64::try_from(process.memory()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Memory probe returning a constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMemory(pub i64);

impl MemoryProbe for FixedMemory {
    fn current_bytes(&self) -> i64 {
        self.0
    }
}
