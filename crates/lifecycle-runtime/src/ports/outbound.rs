//! Outbound (Driven) ports of the application controller.
//!
//! Every collaborator is resolved through the container and stored there as
//! a shared trait object (`Arc<dyn Trait>` wrapped with
//! [`service`](lifecycle_container::service)).

use lifecycle_container::Instance;
use serde_json::{Map, Value};
use tracing::Level;

use crate::application::ApplicationController;
use crate::domain::ApplicationError;

/// Named instances a bootstrap unit asks to register, in order.
pub type Registrations = Vec<(String, Instance)>;

/// Configuration store.
pub trait Config: Send + Sync {
    /// Load configuration for `profile`.
    ///
    /// # Returns
    /// - `true`: values were (re)loaded
    /// - `false`: already loaded and `force` was not set
    fn load(&self, profile: Option<&str>, force: bool) -> bool;

    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`.
    fn set(&self, key: &str, value: Value);

    /// Value stored under `key`, or `default`.
    fn get_or(&self, key: &str, default: Value) -> Value {
        self.get(key).unwrap_or(default)
    }

    /// Whether `key` holds a value.
    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Leveled structured logger.
pub trait Logger: Send + Sync {
    /// Record `message` with structured `context`.
    fn log(&self, level: Level, message: &str, context: &Map<String, Value>);

    /// Record at error level without context.
    fn error(&self, message: &str) {
        self.log(Level::ERROR, message, &Map::new());
    }

    /// Record at warn level without context.
    fn warn(&self, message: &str) {
        self.log(Level::WARN, message, &Map::new());
    }

    /// Record at info level without context.
    fn info(&self, message: &str) {
        self.log(Level::INFO, message, &Map::new());
    }

    /// Record at debug level without context.
    fn debug(&self, message: &str) {
        self.log(Level::DEBUG, message, &Map::new());
    }
}

/// Process-level exception handler.
pub trait ExceptionHandler: Send + Sync {
    /// Install the handler. Called once, during controller construction.
    fn register(&self);
}

/// Unit of work run during the bootstrap phase.
///
/// Returned registrations are added to the container before the next unit
/// runs.
pub trait BootstrapUnit: Send + Sync {
    /// Extend the application.
    fn bootstrap(&self, app: &ApplicationController)
        -> Result<Option<Registrations>, ApplicationError>;
}

/// Request kernel driven by `run` and `terminate`.
pub trait Kernel: Send + Sync {
    /// Handle the incoming request or command.
    fn handle(&self, app: &ApplicationController) -> Result<(), ApplicationError>;

    /// Release resources after handling.
    fn terminate(&self, _app: &ApplicationController) -> Result<(), ApplicationError> {
        Ok(())
    }
}
