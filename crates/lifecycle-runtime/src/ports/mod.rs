//! Ports: capabilities the controller consumes from its collaborators.

pub mod outbound;

pub use outbound::{BootstrapUnit, Config, ExceptionHandler, Kernel, Logger, Registrations};
