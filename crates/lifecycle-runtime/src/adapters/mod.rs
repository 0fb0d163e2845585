//! Adapters implementing the outbound ports.

pub mod memory_config;
pub mod tracing_logger;

pub use memory_config::MemoryConfig;
pub use tracing_logger::TracingLogger;
