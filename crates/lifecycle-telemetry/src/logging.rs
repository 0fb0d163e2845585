//! Subscriber installation.
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a fmt
//! layer, either human-readable or JSON. The subscriber is process-global:
//! only one installation succeeds per process.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

static INSTALLED: AtomicBool = AtomicBool::new(false);

/// Build the filter from `config.log_level` (already resolved against
/// `LC_LOG_LEVEL` and `RUST_LOG` by [`TelemetryConfig::from_env`]).
pub(crate) fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Filter(e.to_string()))
}

/// Install the global subscriber described by `config`.
pub(crate) fn install(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    if INSTALLED.swap(true, Ordering::SeqCst) {
        return Err(TelemetryError::AlreadyInitialized);
    }

    let env_filter = match build_filter(config) {
        Ok(filter) => filter,
        Err(e) => {
            INSTALLED.store(false, Ordering::SeqCst);
            return Err(e);
        }
    };

    let result = if !config.console_output {
        tracing_subscriber::registry().with(env_filter).try_init()
    } else if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(config.with_thread_ids)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(config.with_thread_ids)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
    };

    // Another crate may have installed a global subscriber first.
    result.map_err(|_| TelemetryError::AlreadyInitialized)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );
    Ok(())
}
