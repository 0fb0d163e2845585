//! Lifecycle state machine.
//!
//! ```text
//! Constructed ──init──→ Initialized ──bootstrap──→ Bootstrapped ──run──→ Running ──terminate──→ Terminated
//!      │                                                ↑
//!      └──────────────────bootstrap─────────────────────┘
//! ```
//!
//! Transitions are monotonic: re-running `init` or `bootstrap` never moves
//! the state backward.

use std::fmt;

/// Lifecycle state of an application controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ApplicationState {
    /// Controller built, configuration not loaded yet.
    #[default]
    Constructed,
    /// Configuration loaded.
    Initialized,
    /// Bootstrap phase ran (possibly with no units).
    Bootstrapped,
    /// Request kernel is handling.
    Running,
    /// Shut down. No further transitions.
    Terminated,
}

impl ApplicationState {
    /// Get the state name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Constructed => "constructed",
            Self::Initialized => "initialized",
            Self::Bootstrapped => "bootstrapped",
            Self::Running => "running",
            Self::Terminated => "terminated",
        }
    }

    /// `init` is allowed until the application terminates.
    #[must_use]
    pub fn can_init(&self) -> bool {
        !matches!(self, Self::Terminated)
    }

    /// `bootstrap` is allowed until the application terminates.
    #[must_use]
    pub fn can_bootstrap(&self) -> bool {
        !matches!(self, Self::Terminated)
    }

    /// `run` requires a completed bootstrap phase.
    #[must_use]
    pub fn can_run(&self) -> bool {
        matches!(self, Self::Bootstrapped)
    }

    /// `terminate` requires a running application.
    #[must_use]
    pub fn can_terminate(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Move toward `target` without ever going backward.
    #[must_use]
    pub fn advance(self, target: Self) -> Self {
        self.max(target)
    }
}

impl fmt::Display for ApplicationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the hosted application renders its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// HTML/HTTP responses.
    #[default]
    Http,
    /// Terminal output.
    Console,
    /// JSON payloads.
    Json,
}

impl OutputMode {
    /// Get the mode name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Console => "console",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
