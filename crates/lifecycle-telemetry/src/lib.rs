//! # Lifecycle Telemetry
//!
//! Structured logging setup for processes hosting an application lifecycle.
//! Library crates only emit `tracing` events; binaries call
//! [`init_telemetry`] once at startup.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lifecycle_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(&TelemetryConfig::from_env())?;
//!     // Application runs here...
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LC_SERVICE_NAME` | `lifecycle` | Service name in the startup record |
//! | `LC_LOG_LEVEL` / `RUST_LOG` | `info` | Filter directive |
//! | `LC_CONSOLE_OUTPUT` | `true` | Write records to stdout |
//! | `LC_JSON_LOGS` | `false` | JSON formatted records |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The log level is not a valid filter directive.
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed.
    #[error("Telemetry already initialized")]
    AlreadyInitialized,
}

/// Install the process-wide subscriber.
///
/// Returns a guard that should be held for the lifetime of the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    logging::install(config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name.clone(),
    })
}

/// Guard that keeps telemetry active.
#[derive(Debug)]
pub struct TelemetryGuard {
    service_name: String,
}

impl TelemetryGuard {
    /// Service name the subscriber was installed for.
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry...");
    }
}
