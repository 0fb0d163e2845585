//! # Application Controller
//!
//! Owns the lifecycle of one hosted application and records profiling
//! checkpoints around every step.
//!
//! ## Lifecycle
//!
//! | Step | Operation | Collaborators |
//! |------|-----------|---------------|
//! | 1 | [`ApplicationController::new`] | profiler backend, exception handler (both optional) |
//! | 2 | [`ApplicationController::init`] | configuration store (required) |
//! | 3 | [`ApplicationController::bootstrap`] | bootstrap units |
//! | 4 | [`ApplicationController::run`] | request kernel (optional) |
//! | 5 | [`ApplicationController::terminate`] | request kernel (optional) |
//!
//! Every collaborator is resolved through the injected container under the
//! identifiers in [`keys`](crate::keys). Missing optional collaborators are
//! no-ops.
//!
//! The controller is synchronous and not reentrant: one controller per
//! lifecycle session. No lock is held while collaborators run.

use std::path::MAIN_SEPARATOR;
use std::sync::{Arc, Weak};

use lifecycle_container::{service, Container, ContainerError, ContainerExt};
use lifecycle_profiler::{
    MonotonicTimeSource, Profiler, ProfilerExt, ProfilerProxy, ProfilingEntry, ProfilingSession,
};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::bootstrap::{BootstrapPipeline, BootstrapSpec};
use crate::domain::{ApplicationError, ApplicationState, OutputMode, StartupContext};
use crate::keys::{self, action};
use crate::ports::{Config, ExceptionHandler, Kernel, Logger};

/// Weak handle to the controller, registered in the container under
/// [`keys::APP`].
#[derive(Debug, Clone)]
pub struct ApplicationRef(Weak<ApplicationController>);

impl ApplicationRef {
    /// The controller, if it is still alive.
    #[must_use]
    pub fn upgrade(&self) -> Option<Arc<ApplicationController>> {
        self.0.upgrade()
    }
}

#[derive(Debug, Clone, Copy)]
struct Flags {
    state: ApplicationState,
    debug: bool,
    output_mode: OutputMode,
}

/// Top-level lifecycle state holder.
pub struct ApplicationController {
    container: Arc<dyn Container>,
    base_path: String,
    startup: StartupContext,
    profiler: ProfilerProxy,
    flags: RwLock<Flags>,
}

impl ApplicationController {
    /// Construct the controller.
    ///
    /// ## Construction Order
    ///
    /// 1. Startup context from `startup`, or captured now
    /// 2. Profiler proxy: forwards to `contract.profiler` when bound,
    ///    otherwise a local session anchored at the startup instant
    /// 3. Marker `app.start` at timestamp 0 with the startup memory
    /// 4. Base path with trailing separators trimmed
    /// 5. Self-registration under `app`
    /// 6. Exception handler resolved and registered, when bound
    pub fn new(
        container: Arc<dyn Container>,
        base_path: impl AsRef<str>,
        startup: Option<StartupContext>,
    ) -> Arc<Self> {
        let startup = startup.unwrap_or_else(StartupContext::now);

        let backend = if container.has(keys::PROFILER_CONTRACT) {
            match container.make_as::<Arc<dyn Profiler>>(keys::PROFILER_CONTRACT, &[]) {
                Ok(backend) => Some(backend),
                Err(e) => {
                    warn!("[Application] Profiler backend unavailable, using local session: {}", e);
                    None
                }
            }
        } else {
            None
        };
        let session = ProfilingSession::new(
            MonotonicTimeSource::new(startup.start_instant),
            startup.profiling,
        );
        let profiler = ProfilerProxy::new(backend, session);

        profiler.stop(action::START, Some(0), Some(startup.start_memory), None);
        profiler.start_now(action::CONSTRUCTOR);

        profiler.start_now(action::SET_BASE_PATH);
        let base_path = base_path
            .as_ref()
            .trim_end_matches(['/', '\\'])
            .to_string();
        profiler.stop_now(action::SET_BASE_PATH);

        let app = Arc::new(Self {
            container,
            base_path,
            startup,
            profiler,
            flags: RwLock::new(Flags {
                state: ApplicationState::Constructed,
                debug: false,
                output_mode: OutputMode::default(),
            }),
        });

        app.container
            .instance(keys::APP, Arc::new(ApplicationRef(Arc::downgrade(&app))));

        match app.exception_handler() {
            Ok(Some(handler)) => {
                handler.register();
                debug!("[Application] Exception handler registered");
            }
            Ok(None) => {}
            Err(e) => warn!("[Application] Exception handler could not be resolved: {}", e),
        }

        app.profiler.stop_now(action::CONSTRUCTOR);
        info!("[Application] Constructed at {}", app.base_path);
        app
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Resolve and load the configuration, then derive the debug and
    /// profiling flags from it.
    ///
    /// # Errors
    /// The container's resolution error when no configuration is bound.
    pub fn init(&self) -> Result<(), ApplicationError> {
        self.ensure(ApplicationState::can_init, "init")?;

        self.profiler.start_now(action::INIT);
        let result = self.load_config();
        self.profiler.stop_now(action::INIT);
        result?;

        self.advance(ApplicationState::Initialized);
        info!("[Application] Initialized (debug: {})", self.is_debug_mode());
        Ok(())
    }

    fn load_config(&self) -> Result<(), ApplicationError> {
        let config: Arc<dyn Config> = self.container.make_as(keys::CONFIG_CONTRACT, &[])?;
        config.load(None, false);
        self.container.instance(keys::CONFIG, service(config.clone()));

        let debug = config
            .get(keys::DEBUG_FLAG)
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        self.flags.write().debug = debug;

        if let Some(profiling) = config.get(keys::PROFILING_FLAG).and_then(|v| v.as_bool()) {
            self.profiler.enable(profiling);
        }
        Ok(())
    }

    /// Run the bootstrap phase.
    ///
    /// The application is bootstrapped once every unit succeeded, including
    /// when the list is empty or [`BootstrapSpec::Skip`] was given. Calling
    /// it again re-runs the units without moving the state backward.
    ///
    /// # Returns
    /// The number of units executed.
    pub fn bootstrap(&self, spec: impl Into<BootstrapSpec>) -> Result<usize, ApplicationError> {
        self.ensure(ApplicationState::can_bootstrap, "bootstrap")?;

        let executed = BootstrapPipeline::run(self, &spec.into())?;
        self.advance(ApplicationState::Bootstrapped);
        info!("[Application] Bootstrapped ({} unit(s))", executed);
        Ok(executed)
    }

    /// Hand control to the request kernel.
    pub fn run(&self) -> Result<(), ApplicationError> {
        self.ensure(ApplicationState::can_run, "run")?;
        self.advance(ApplicationState::Running);

        self.profiler.start_now(action::RUN);
        let result = self.kernel().and_then(|kernel| match kernel {
            Some(kernel) => kernel.handle(self),
            None => {
                debug!("[Application] No kernel bound, nothing to handle");
                Ok(())
            }
        });
        self.profiler.stop_now(action::RUN);
        result
    }

    /// Let the request kernel release its resources and shut down.
    pub fn terminate(&self) -> Result<(), ApplicationError> {
        self.ensure(ApplicationState::can_terminate, "terminate")?;

        self.profiler.start_now(action::TERMINATE);
        let result = self.kernel().and_then(|kernel| match kernel {
            Some(kernel) => kernel.terminate(self),
            None => Ok(()),
        });
        self.profiler.stop_now(action::TERMINATE);
        result?;

        self.advance(ApplicationState::Terminated);
        info!("[Application] Terminated");
        Ok(())
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ApplicationState {
        self.flags.read().state
    }

    /// Whether the bootstrap phase completed.
    #[must_use]
    pub fn is_bootstrapped(&self) -> bool {
        self.state() >= ApplicationState::Bootstrapped
    }

    /// Whether the configuration enabled debug mode.
    #[must_use]
    pub fn is_debug_mode(&self) -> bool {
        self.flags.read().debug
    }

    fn ensure(
        &self,
        allowed: fn(&ApplicationState) -> bool,
        operation: &'static str,
    ) -> Result<(), ApplicationError> {
        let state = self.state();
        if allowed(&state) {
            Ok(())
        } else {
            Err(ApplicationError::InvalidTransition {
                from: state,
                operation,
            })
        }
    }

    fn advance(&self, target: ApplicationState) {
        let mut flags = self.flags.write();
        flags.state = flags.state.advance(target);
    }

    // =========================================================================
    // Collaborators
    // =========================================================================

    /// The injected container.
    #[must_use]
    pub fn container(&self) -> &Arc<dyn Container> {
        &self.container
    }

    /// Registered configuration, `None` when it cannot be resolved.
    pub fn config(&self) -> Option<Arc<dyn Config>> {
        self.require_config().ok()
    }

    /// Registered configuration, with the container failure when it cannot
    /// be resolved.
    pub(crate) fn require_config(&self) -> Result<Arc<dyn Config>, ApplicationError> {
        self.profiler.start_now(action::CONFIG_GET);
        let config = self.container.make_as::<Arc<dyn Config>>(keys::CONFIG, &[]);
        self.profiler.stop_now(action::CONFIG_GET);
        Ok(config?)
    }

    /// Registered configuration, or `default`.
    pub fn config_or(&self, default: Arc<dyn Config>) -> Arc<dyn Config> {
        self.config().unwrap_or(default)
    }

    /// Registered configuration, or the result of `default`.
    pub fn config_or_else<F>(&self, default: F) -> Arc<dyn Config>
    where
        F: FnOnce() -> Arc<dyn Config>,
    {
        self.config().unwrap_or_else(default)
    }

    /// Configuration value under `key`, or `default` when either the
    /// configuration or the key is missing.
    pub fn config_value(&self, key: &str, default: Value) -> Value {
        match self.config() {
            Some(config) => config.get_or(key, default),
            None => default,
        }
    }

    /// The logger: the instance registered under `logger`, or a new one
    /// made from `contract.logger` and cached under `logger`.
    pub fn log(&self) -> Result<Arc<dyn Logger>, ContainerError> {
        self.profiler.start_now(action::LOGGER_GET);

        if self.container.has(keys::LOGGER) {
            let logger = self.container.make_as::<Arc<dyn Logger>>(keys::LOGGER, &[]);
            self.profiler.stop_now(action::LOGGER_GET);
            return logger;
        }

        self.profiler.start_now(action::LOGGER_MAKE);
        let logger = self
            .container
            .make_as::<Arc<dyn Logger>>(keys::LOGGER_CONTRACT, &[]);
        if let Ok(logger) = &logger {
            self.container.instance(keys::LOGGER, service(logger.clone()));
        }
        self.profiler.stop_now(action::LOGGER_MAKE);
        self.profiler.stop_now(action::LOGGER_GET);
        logger
    }

    /// The exception handler, `None` when nothing is bound.
    pub fn exception_handler(&self) -> Result<Option<Arc<dyn ExceptionHandler>>, ContainerError> {
        self.profiler.start_now(action::EXCEPTION_HANDLER_RESOLVE);
        let handler = if self.container.has(keys::EXCEPTION_HANDLER_CONTRACT) {
            self.container
                .make_as::<Arc<dyn ExceptionHandler>>(keys::EXCEPTION_HANDLER_CONTRACT, &[])
                .map(Some)
        } else {
            Ok(None)
        };
        self.profiler.stop_now(action::EXCEPTION_HANDLER_RESOLVE);
        handler
    }

    fn kernel(&self) -> Result<Option<Arc<dyn Kernel>>, ApplicationError> {
        if !self.container.has(keys::KERNEL_CONTRACT) {
            return Ok(None);
        }
        Ok(Some(
            self.container
                .make_as::<Arc<dyn Kernel>>(keys::KERNEL_CONTRACT, &[])?,
        ))
    }

    // =========================================================================
    // Profiling
    // =========================================================================

    /// The profiler capability (local session or injected backend).
    #[must_use]
    pub fn profiler(&self) -> &ProfilerProxy {
        &self.profiler
    }

    /// Recorded entries ordered by timestamp, `None` while disabled.
    #[must_use]
    pub fn profiling(&self) -> Option<Vec<ProfilingEntry>> {
        self.profiler.profiling()
    }

    /// Start the stopwatch for `action`.
    pub fn profiling_start(&self, action: &str) {
        self.profiler.start_now(action);
    }

    /// Stop the stopwatch for `action` and record an entry.
    pub fn profiling_stop(&self, action: &str) {
        self.profiler.stop_now(action);
    }

    /// Enable or disable profiling.
    pub fn enable_profiling(&self, enabled: bool) {
        self.profiler.enable(enabled);
    }

    /// Readings taken when the process started.
    #[must_use]
    pub fn startup(&self) -> &StartupContext {
        &self.startup
    }

    // =========================================================================
    // Paths and output
    // =========================================================================

    /// Base path with trailing separators removed.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Join `relative` onto the base path. `None` or an empty path returns
    /// the base path.
    #[must_use]
    pub fn path<'a>(&self, relative: impl Into<Option<&'a str>>) -> String {
        match relative
            .into()
            .map(|r| r.trim_start_matches(['/', '\\']))
        {
            Some(relative) if !relative.is_empty() => {
                format!("{}{}{}", self.base_path, MAIN_SEPARATOR, relative)
            }
            _ => self.base_path.clone(),
        }
    }

    /// Current output mode.
    #[must_use]
    pub fn output_mode(&self) -> OutputMode {
        self.flags.read().output_mode
    }

    /// Change the output mode.
    pub fn set_output_mode(&self, mode: OutputMode) {
        self.flags.write().output_mode = mode;
    }
}

impl std::fmt::Debug for ApplicationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let flags = *self.flags.read();
        f.debug_struct("ApplicationController")
            .field("base_path", &self.base_path)
            .field("state", &flags.state)
            .field("debug", &flags.debug)
            .field("output_mode", &flags.output_mode)
            .field("profiler", &self.profiler)
            .finish_non_exhaustive()
    }
}
