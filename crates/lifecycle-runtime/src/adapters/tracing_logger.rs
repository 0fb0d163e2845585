//! Logger port backed by `tracing`.

use serde_json::{Map, Value};
use tracing::Level;

use crate::ports::Logger;

/// Emits every record as a `tracing` event with the context serialized as a
/// structured `context` field.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    channel: String,
}

impl TracingLogger {
    /// Logger for `channel`.
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
        }
    }

    /// Channel name attached to every record.
    #[must_use]
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new("app")
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, context: &Map<String, Value>) {
        let context = Value::Object(context.clone());
        let channel = self.channel.as_str();

        match level {
            Level::ERROR => tracing::error!(channel, %context, "{}", message),
            Level::WARN => tracing::warn!(channel, %context, "{}", message),
            Level::INFO => tracing::info!(channel, %context, "{}", message),
            Level::DEBUG => tracing::debug!(channel, %context, "{}", message),
            _ => tracing::trace!(channel, %context, "{}", message),
        }
    }
}
