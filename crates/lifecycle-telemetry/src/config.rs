//! Telemetry configuration from environment variables.

use std::env;

/// Default service name reported in log records.
pub const DEFAULT_SERVICE_NAME: &str = "lifecycle";

/// Subscriber settings for a lifecycle host process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup record
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive
    pub log_level: String,

    /// Whether to write records to stdout
    pub console_output: bool,

    /// Whether records are formatted as JSON
    pub json_logs: bool,

    /// Whether records carry the emitting thread id
    pub with_thread_ids: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
            with_thread_ids: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LC_SERVICE_NAME`: Service name (default: lifecycle)
    /// - `LC_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `LC_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `LC_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`TelemetryConfig::from_env`], reading through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let json_logs = lookup("LC_JSON_LOGS")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Self {
            service_name: lookup("LC_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),

            log_level: lookup("LC_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            console_output: lookup("LC_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs,

            // Thread ids only help once records are machine-parsed.
            with_thread_ids: json_logs,
        }
    }
}
