//! Well-known container identifiers, configuration keys and profiling
//! action names.

/// The application itself (an [`ApplicationRef`](crate::ApplicationRef)).
pub const APP: &str = "app";

/// Loaded configuration, registered by `init`.
pub const CONFIG: &str = "config";

/// Cached logger, registered on first use.
pub const LOGGER: &str = "logger";

/// Binding producing the configuration store.
pub const CONFIG_CONTRACT: &str = "contract.config";

/// Binding producing the logger.
pub const LOGGER_CONTRACT: &str = "contract.logger";

/// Optional binding producing the exception handler.
pub const EXCEPTION_HANDLER_CONTRACT: &str = "contract.exception_handler";

/// Optional binding producing a profiler backend.
pub const PROFILER_CONTRACT: &str = "contract.profiler";

/// Optional binding producing the request kernel.
pub const KERNEL_CONTRACT: &str = "contract.kernel";

/// Configuration key holding the default bootstrap unit list.
pub const DEFAULT_BOOTSTRAP_KEY: &str = "bootstrappers";

/// Configuration flag enabling debug mode.
pub const DEBUG_FLAG: &str = "debug";

/// Configuration flag forwarded to the profiler.
pub const PROFILING_FLAG: &str = "profiling";

/// Profiling action names.
pub mod action {
    /// Marker recorded at timestamp zero with the startup memory.
    pub const START: &str = "app.start";
    /// Controller construction.
    pub const CONSTRUCTOR: &str = "app.constructor";
    /// Base path normalization.
    pub const SET_BASE_PATH: &str = "app.set_base_path";
    /// Exception handler lookup.
    pub const EXCEPTION_HANDLER_RESOLVE: &str = "app.exceptionHandler.resolve";
    /// Configuration phase.
    pub const INIT: &str = "app.init";
    /// Configuration lookup.
    pub const CONFIG_GET: &str = "app.config.get";
    /// Logger lookup.
    pub const LOGGER_GET: &str = "app.logger.get";
    /// Logger construction on first use.
    pub const LOGGER_MAKE: &str = "app.logger.make";
    /// Whole bootstrap phase.
    pub const BOOTSTRAP: &str = "app.bootstrap";
    /// Request kernel handling.
    pub const RUN: &str = "app.run";
    /// Shutdown.
    pub const TERMINATE: &str = "app.terminate";

    /// Action name for a single bootstrap unit.
    #[must_use]
    pub fn bootstrap_unit(identifier: &str) -> String {
        format!("{BOOTSTRAP}: {identifier}")
    }
}
