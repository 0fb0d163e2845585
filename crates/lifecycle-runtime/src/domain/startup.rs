//! Process startup context.

use std::time::Instant;

use lifecycle_profiler::{MemoryProbe, ProcessMemory};

/// Readings taken when the hosting process started.
///
/// Profiling timestamps are measured from `start_instant`. The
/// `profiling` flag decides whether the local session records from
/// construction on; it can still be enabled later through configuration.
#[derive(Debug, Clone, Copy)]
pub struct StartupContext {
    /// Origin of all profiling timestamps.
    pub start_instant: Instant,
    /// Process memory at startup, in bytes.
    pub start_memory: i64,
    /// Whether profiling is enabled from the start.
    pub profiling: bool,
}

impl StartupContext {
    /// Capture the current instant and process memory. Profiling is off.
    #[must_use]
    pub fn now() -> Self {
        Self {
            start_instant: Instant::now(),
            start_memory: ProcessMemory::new().current_bytes(),
            profiling: false,
        }
    }

    /// Set the initial profiling flag.
    #[must_use]
    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.profiling = enabled;
        self
    }
}

impl Default for StartupContext {
    fn default() -> Self {
        Self::now()
    }
}
