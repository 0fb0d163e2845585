//! Bootstrap phase: unit lists and the pipeline executing them.

pub mod pipeline;
pub mod spec;

pub use pipeline::BootstrapPipeline;
pub use spec::{BootstrapSpec, UnitSpec};
