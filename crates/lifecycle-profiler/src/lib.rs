//! # Lifecycle Profiler
//!
//! Fine-grained timing and memory checkpoints for the application lifecycle.
//!
//! ## Components
//!
//! | Component | Role |
//! |-----------|------|
//! | [`StopwatchRegistry`] | Named start markers awaiting a stop |
//! | [`ProfilingLog`] | Append-only, timestamp-sortable entry log |
//! | [`ProfilingSession`] | Registry + log + `enabled` flag for one session |
//! | [`ProfilerProxy`] | Stable capability over a local session or an injected backend |
//!
//! ## Usage
//!
//! ```rust
//! use lifecycle_profiler::{
//!     MonotonicTimeSource, Profiler, ProfilerExt, ProfilerProxy, ProfilingSession,
//! };
//!
//! let proxy = ProfilerProxy::new(None, ProfilingSession::new(MonotonicTimeSource::default(), true));
//! proxy.start_now("app.bootstrap");
//! proxy.stop_now("app.bootstrap");
//!
//! let entries = proxy.profiling().unwrap();
//! assert_eq!(entries[0].action, "app.bootstrap");
//! ```

#![warn(missing_docs)]

pub mod entry;
pub mod ports;
pub mod proxy;
pub mod session;
pub mod stacktrace;
pub mod stopwatch;

pub use entry::{ProfilingEntry, StackFrame};
pub use ports::{FixedMemory, MemoryProbe, MonotonicTimeSource, ProcessMemory, TimeSource};
pub use proxy::{LocalProfiler, Profiler, ProfilerExt, ProfilerProxy};
pub use session::{ProfilingLog, ProfilingSession};
pub use stopwatch::{Stopwatch, StopwatchRegistry};
