//! # Bootstrap Pipeline
//!
//! Resolves and executes bootstrap units in declaration order.
//!
//! ## Per-Unit Flow
//!
//! ```text
//! UnitSpec ──make(id, deps)──→ Instance ──downcast──→ Arc<dyn BootstrapUnit>
//!                                                              │
//!                                                       bootstrap(app)
//!                                                              │
//!                                   registrations ──instance()──→ Container
//! ```
//!
//! Registrations of a unit are visible to every later unit. A failure
//! aborts the remaining units; registrations made so far are kept.

use std::sync::Arc;

use lifecycle_container::Container;
use lifecycle_profiler::ProfilerExt;
use tracing::{debug, info};

use super::spec::{BootstrapSpec, UnitSpec};
use crate::application::ApplicationController;
use crate::domain::ApplicationError;
use crate::keys::action;
use crate::ports::{BootstrapUnit, Config};

/// Executes bootstrap units against an application.
#[derive(Debug, Clone, Copy, Default)]
pub struct BootstrapPipeline;

impl BootstrapPipeline {
    /// Run every unit named by `spec`.
    ///
    /// # Returns
    /// The number of units executed.
    pub fn run(app: &ApplicationController, spec: &BootstrapSpec) -> Result<usize, ApplicationError> {
        let profiler = app.profiler();
        profiler.start_now(action::BOOTSTRAP);
        let result = Self::resolve_units(app, spec).and_then(|units| Self::execute(app, &units));
        profiler.stop_now(action::BOOTSTRAP);
        result
    }

    fn resolve_units(
        app: &ApplicationController,
        spec: &BootstrapSpec,
    ) -> Result<Vec<UnitSpec>, ApplicationError> {
        match spec {
            BootstrapSpec::Skip => Ok(Vec::new()),
            BootstrapSpec::Units(units) => Ok(units.clone()),
            BootstrapSpec::ConfigKey(key) => match app.require_config()?.get(key) {
                Some(value) => UnitSpec::parse_list(key, &value),
                None => {
                    debug!("[Bootstrap] No bootstrap list under [{}]", key);
                    Ok(Vec::new())
                }
            },
        }
    }

    fn execute(app: &ApplicationController, units: &[UnitSpec]) -> Result<usize, ApplicationError> {
        info!("[Bootstrap] Running {} bootstrap unit(s)", units.len());

        for unit in units {
            let unit_action = action::bootstrap_unit(&unit.identifier);
            app.profiler().start_now(&unit_action);
            let result = Self::execute_unit(app, unit);
            app.profiler().stop_now(&unit_action);
            result?;
        }

        Ok(units.len())
    }

    fn execute_unit(app: &ApplicationController, unit: &UnitSpec) -> Result<(), ApplicationError> {
        let instance = app.container().make(&unit.identifier, &unit.dependencies)?;

        let bootstrapper = instance
            .downcast_ref::<Arc<dyn BootstrapUnit>>()
            .cloned()
            .ok_or_else(|| ApplicationError::Configuration {
                identifier: unit.identifier.clone(),
            })?;

        let registrations = bootstrapper.bootstrap(app)?.unwrap_or_default();
        debug!(
            "[Bootstrap] {} registered {} instance(s)",
            unit.identifier,
            registrations.len()
        );
        for (key, value) in registrations {
            app.container().instance(&key, value);
        }
        Ok(())
    }
}
