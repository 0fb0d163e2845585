//! # Lifecycle Runtime Host
//!
//! Wires in-memory collaborators, drives one full lifecycle and prints the
//! profiling trace as JSON.
//!
//! ## Startup Sequence
//!
//! 1. Install the tracing subscriber (`LC_*` environment variables)
//! 2. Bind configuration, logger, kernel and a demo bootstrap unit
//! 3. Construct, init, bootstrap, run, terminate
//! 4. Print the recorded profiling entries

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::{json, Map};
use tracing::{info, Level};

use lifecycle_container::{
    factory, service, Container, ContainerExt, InMemoryContainer, Instance,
};
use lifecycle_runtime::keys;
use lifecycle_runtime::{
    ApplicationController, ApplicationError, BootstrapSpec, BootstrapUnit, Config, Kernel, Logger,
    MemoryConfig, Registrations, StartupContext, TracingLogger,
};
use lifecycle_telemetry::{init_telemetry, TelemetryConfig};

/// Registers a greeting other units and the kernel can read.
struct GreetingUnit {
    greeting: String,
}

impl BootstrapUnit for GreetingUnit {
    fn bootstrap(&self, app: &ApplicationController) -> Result<Option<Registrations>, ApplicationError> {
        let logger = app.log()?;
        logger.debug("registering greeting");
        let greeting: Instance = Arc::new(self.greeting.clone());
        Ok(Some(vec![("greeting".to_string(), greeting)]))
    }
}

/// Logs the greeting once per run.
struct GreetingKernel;

impl Kernel for GreetingKernel {
    fn handle(&self, app: &ApplicationController) -> Result<(), ApplicationError> {
        let greeting: String = app.container().make_as("greeting", &[])?;
        let mut context = Map::new();
        context.insert("output_mode".to_string(), json!(app.output_mode().as_str()));
        app.log()?.log(Level::INFO, &greeting, &context);
        Ok(())
    }
}

fn build_container(profiling: bool) -> Arc<InMemoryContainer> {
    let container = Arc::new(InMemoryContainer::new());

    let config = Arc::new(MemoryConfig::from_value(json!({
        "debug": true,
        "profiling": profiling,
        "bootstrappers": [
            {"demo.greeting": ["Hello from the lifecycle runtime"]}
        ]
    })));
    container.singleton(
        keys::CONFIG_CONTRACT,
        factory(move |_, _| Ok(service::<dyn Config>(config.clone()))),
    );
    container.singleton(
        keys::LOGGER_CONTRACT,
        factory(|_, _| Ok(service::<dyn Logger>(Arc::new(TracingLogger::new("demo"))))),
    );
    container.bind(
        "demo.greeting",
        factory(|_, args| {
            let greeting = args
                .first()
                .and_then(|arg| arg.as_str())
                .unwrap_or("Hello")
                .to_string();
            Ok(service::<dyn BootstrapUnit>(Arc::new(GreetingUnit { greeting })))
        }),
    );
    container.instance(
        keys::KERNEL_CONTRACT,
        service::<dyn Kernel>(Arc::new(GreetingKernel)),
    );

    container
}

fn main() -> Result<()> {
    let _telemetry = init_telemetry(&TelemetryConfig::from_env())?;

    let base_path = env::args()
        .nth(1)
        .map_or_else(env::current_dir, |path| Ok(path.into()))
        .context("Failed to determine base path")?;

    let startup = StartupContext::now().with_profiling(true);
    let container = build_container(true);
    let app = ApplicationController::new(container, base_path.to_string_lossy(), Some(startup));

    app.init().context("Failed to initialize application")?;
    app.bootstrap(BootstrapSpec::default())
        .context("Failed to bootstrap application")?;
    app.run().context("Application run failed")?;
    app.terminate().context("Failed to terminate application")?;

    info!("Lifecycle complete, state: {}", app.state());

    let trace = app.profiling().unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&trace)?);
    Ok(())
}
