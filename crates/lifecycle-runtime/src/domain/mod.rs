//! Domain layer: lifecycle state, startup context and errors.

pub mod errors;
pub mod startup;
pub mod state;

pub use errors::ApplicationError;
pub use startup::StartupContext;
pub use state::{ApplicationState, OutputMode};
