//! # Lifecycle Runtime
//!
//! In-process application lifecycle controller with built-in timing and
//! memory instrumentation.
//!
//! ## Architectural Layout
//!
//! - **domain/**: lifecycle state machine, startup context, errors
//! - **ports/**: capabilities consumed from collaborators (config, logger,
//!   exception handler, bootstrap units, kernel)
//! - **bootstrap/**: unit lists and the pipeline executing them
//! - **adapters/**: in-memory config store and `tracing` logger
//! - **application**: the controller composing all of the above
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use lifecycle_container::InMemoryContainer;
//! use lifecycle_runtime::{ApplicationController, ApplicationState};
//!
//! let app = ApplicationController::new(Arc::new(InMemoryContainer::new()), "/srv/app", None);
//! app.bootstrap(None::<&str>).unwrap();
//! assert_eq!(app.state(), ApplicationState::Bootstrapped);
//! ```

#![warn(missing_docs)]

pub mod adapters;
pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod keys;
pub mod ports;

pub use adapters::{MemoryConfig, TracingLogger};
pub use application::{ApplicationController, ApplicationRef};
pub use bootstrap::{BootstrapPipeline, BootstrapSpec, UnitSpec};
pub use domain::{ApplicationError, ApplicationState, OutputMode, StartupContext};
pub use ports::{BootstrapUnit, Config, ExceptionHandler, Kernel, Logger, Registrations};
