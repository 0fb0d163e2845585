//! Test collaborators.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use lifecycle_container::{factory, service, Container, InMemoryContainer, Instance};
use lifecycle_profiler::{Profiler, ProfilingEntry, StackFrame};
use lifecycle_runtime::{
    keys, ApplicationController, ApplicationError, BootstrapUnit, Config, ExceptionHandler, Logger,
    MemoryConfig, Registrations,
};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use tracing::Level;

/// Identifier of [`FlagBootstrapper`] in [`container_with_config`].
pub const FLAG_BOOTSTRAPPER: &str = "test.bootstrapper";

/// Container with a [`MemoryConfig`] bound under `contract.config` and
/// [`FlagBootstrapper`] bound under [`FLAG_BOOTSTRAPPER`].
pub fn container_with_config(values: Value) -> (Arc<InMemoryContainer>, Arc<MemoryConfig>) {
    let container = Arc::new(InMemoryContainer::new());
    let config = Arc::new(MemoryConfig::from_value(values));

    let shared = config.clone();
    container.singleton(
        keys::CONFIG_CONTRACT,
        factory(move |_, _| Ok(service::<dyn Config>(shared.clone()))),
    );
    container.bind(
        FLAG_BOOTSTRAPPER,
        factory(|_, _| Ok(service::<dyn BootstrapUnit>(Arc::new(FlagBootstrapper)))),
    );

    (container, config)
}

/// Sets config `bootstrapped = true` and registers itself under
/// [`FLAG_BOOTSTRAPPER`].
pub struct FlagBootstrapper;

impl BootstrapUnit for FlagBootstrapper {
    fn bootstrap(&self, app: &ApplicationController) -> Result<Option<Registrations>, ApplicationError> {
        if let Some(config) = app.config() {
            config.set("bootstrapped", json!(true));
        }
        let marker: Instance = Arc::new(FLAG_BOOTSTRAPPER.to_string());
        Ok(Some(vec![(FLAG_BOOTSTRAPPER.to_string(), marker)]))
    }
}

/// Registers `value` under `key` and records the keys visible when it ran.
pub struct RegisteringUnit {
    pub key: String,
    pub value: String,
    pub requires: Option<String>,
}

impl BootstrapUnit for RegisteringUnit {
    fn bootstrap(&self, app: &ApplicationController) -> Result<Option<Registrations>, ApplicationError> {
        if let Some(required) = &self.requires {
            if !app.container().has(required) {
                return Err(ApplicationError::unit(
                    self.key.clone(),
                    format!("{required} not registered yet"),
                ));
            }
        }
        let value: Instance = Arc::new(self.value.clone());
        Ok(Some(vec![(self.key.clone(), value)]))
    }
}

/// Bind a [`RegisteringUnit`] under `id`.
pub fn bind_registering_unit(
    container: &dyn Container,
    id: &str,
    key: &str,
    requires: Option<&str>,
) {
    let key = key.to_string();
    let requires = requires.map(str::to_string);
    container.bind(
        id,
        factory(move |_, _| {
            Ok(service::<dyn BootstrapUnit>(Arc::new(RegisteringUnit {
                key: key.clone(),
                value: format!("{key}-value"),
                requires: requires.clone(),
            })))
        }),
    );
}

/// Bootstrap unit taking its greeting and a service from constructor args.
pub struct ArgumentUnit {
    pub greeting: String,
    pub dependency: Arc<String>,
}

impl BootstrapUnit for ArgumentUnit {
    fn bootstrap(&self, _app: &ApplicationController) -> Result<Option<Registrations>, ApplicationError> {
        let combined: Instance = Arc::new(format!("{} {}", self.greeting, self.dependency));
        Ok(Some(vec![("argument.result".to_string(), combined)]))
    }
}

/// Counts registrations.
#[derive(Default)]
pub struct TestHandler {
    pub registered: AtomicBool,
    pub calls: AtomicUsize,
}

impl ExceptionHandler for TestHandler {
    fn register(&self) {
        self.registered.store(true, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

/// Keeps every record in memory.
#[derive(Default)]
pub struct TestLogger {
    pub records: Mutex<Vec<(Level, String)>>,
}

impl Logger for TestLogger {
    fn log(&self, level: Level, message: &str, _context: &Map<String, Value>) {
        self.records.lock().push((level, message.to_string()));
    }
}

/// Profiler backend recording the calls it receives.
#[derive(Default)]
pub struct TestProfiler {
    pub started: Mutex<Vec<String>>,
    pub stopped: Mutex<Vec<String>>,
    pub enabled: Mutex<Option<bool>>,
}

impl Profiler for TestProfiler {
    fn start(&self, action: &str, _timestamp: Option<i64>, _memory: Option<i64>) {
        self.started.lock().push(action.to_string());
    }

    fn stop(
        &self,
        action: &str,
        _timestamp: Option<i64>,
        _memory: Option<i64>,
        _stacktrace: Option<Vec<StackFrame>>,
    ) {
        self.stopped.lock().push(action.to_string());
    }

    fn enable(&self, enabled: bool) {
        *self.enabled.lock() = Some(enabled);
    }

    fn profiling(&self) -> Option<Vec<ProfilingEntry>> {
        Some(Vec::new())
    }
}
