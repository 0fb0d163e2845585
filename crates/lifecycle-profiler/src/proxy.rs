//! # Profiler Capability and Proxy
//!
//! Lifecycle code calls profiling unconditionally. The [`ProfilerProxy`]
//! decides once, at construction, where those calls go:
//!
//! ```text
//!                       ┌──────────────────────┐
//!   start/stop/...  ──→ │    ProfilerProxy     │
//!                       └──────────┬───────────┘
//!                  ┌───────────────┴───────────────┐
//!                  ▼                               ▼
//!        Local(LocalProfiler)            Forward(Arc<dyn Profiler>)
//!        ProfilingSession                 injected backend, verbatim
//! ```
//!
//! The two variants are mutually exclusive: a bound backend bypasses the
//! local session entirely and nothing is ever merged.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::entry::{ProfilingEntry, StackFrame};
use crate::session::ProfilingSession;

/// Profiler capability.
///
/// Implementations must never fail: profiling is best effort and a
/// disabled or absent backend behaves as a no-op.
pub trait Profiler: Send + Sync {
    /// Start the stopwatch for `action`.
    fn start(&self, action: &str, timestamp: Option<i64>, memory: Option<i64>);

    /// Stop the stopwatch for `action` and record an entry.
    fn stop(
        &self,
        action: &str,
        timestamp: Option<i64>,
        memory: Option<i64>,
        stacktrace: Option<Vec<StackFrame>>,
    );

    /// Enable or disable recording.
    fn enable(&self, enabled: bool);

    /// Recorded entries ordered by timestamp, `None` while disabled.
    fn profiling(&self) -> Option<Vec<ProfilingEntry>>;
}

/// Shorthands for the common "now, current memory" calls.
pub trait ProfilerExt: Profiler {
    /// `start(action, None, None)`.
    fn start_now(&self, action: &str) {
        self.start(action, None, None);
    }

    /// `stop(action, None, None, None)`.
    fn stop_now(&self, action: &str) {
        self.stop(action, None, None, None);
    }
}

impl<P: Profiler + ?Sized> ProfilerExt for P {}

/// In-process profiler backed by a [`ProfilingSession`].
#[derive(Debug, Default)]
pub struct LocalProfiler {
    session: Mutex<ProfilingSession>,
}

impl LocalProfiler {
    /// Wrap a session.
    #[must_use]
    pub fn new(session: ProfilingSession) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    /// Whether the wrapped session is recording.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.session.lock().is_enabled()
    }
}

impl Profiler for LocalProfiler {
    fn start(&self, action: &str, timestamp: Option<i64>, memory: Option<i64>) {
        self.session.lock().start(action, timestamp, memory);
    }

    fn stop(
        &self,
        action: &str,
        timestamp: Option<i64>,
        memory: Option<i64>,
        stacktrace: Option<Vec<StackFrame>>,
    ) {
        self.session
            .lock()
            .stop(action, timestamp, memory, stacktrace);
    }

    fn enable(&self, enabled: bool) {
        self.session.lock().enable(enabled);
    }

    fn profiling(&self) -> Option<Vec<ProfilingEntry>> {
        self.session.lock().entries()
    }
}

/// Stable profiler capability regardless of whether a backend was bound.
pub enum ProfilerProxy {
    /// No backend bound; the local session records.
    Local(LocalProfiler),
    /// A backend was bound; every call is forwarded to it.
    Forward(Arc<dyn Profiler>),
}

impl ProfilerProxy {
    /// Select the variant: forward to `backend` if present, otherwise record
    /// into `session`.
    pub fn new(backend: Option<Arc<dyn Profiler>>, session: ProfilingSession) -> Self {
        match backend {
            Some(backend) => Self::Forward(backend),
            None => Self::Local(LocalProfiler::new(session)),
        }
    }

    /// Proxy over a local session.
    pub fn local(session: ProfilingSession) -> Self {
        Self::Local(LocalProfiler::new(session))
    }

    /// Proxy forwarding to `backend`.
    pub fn forward(backend: Arc<dyn Profiler>) -> Self {
        Self::Forward(backend)
    }

    /// True when calls go to an injected backend.
    #[must_use]
    pub fn is_forwarding(&self) -> bool {
        matches!(self, Self::Forward(_))
    }

    fn target(&self) -> &dyn Profiler {
        match self {
            Self::Local(local) => local,
            Self::Forward(backend) => backend.as_ref(),
        }
    }
}

impl Profiler for ProfilerProxy {
    fn start(&self, action: &str, timestamp: Option<i64>, memory: Option<i64>) {
        self.target().start(action, timestamp, memory);
    }

    fn stop(
        &self,
        action: &str,
        timestamp: Option<i64>,
        memory: Option<i64>,
        stacktrace: Option<Vec<StackFrame>>,
    ) {
        self.target().stop(action, timestamp, memory, stacktrace);
    }

    fn enable(&self, enabled: bool) {
        self.target().enable(enabled);
    }

    fn profiling(&self) -> Option<Vec<ProfilingEntry>> {
        self.target().profiling()
    }
}

impl std::fmt::Debug for ProfilerProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local(local) => f.debug_tuple("Local").field(local).finish(),
            Self::Forward(_) => f.debug_tuple("Forward").finish_non_exhaustive(),
        }
    }
}
