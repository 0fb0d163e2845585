//! # Lifecycle Container
//!
//! Service resolution capability consumed by the application controller.
//!
//! ## Capability
//!
//! | Operation | Semantics |
//! |-----------|-----------|
//! | `make(id, args)` | Resolve an instance; service-reference args are resolved first |
//! | `instance(key, value)` | Register a named instance |
//! | `has(id)` | Whether `id` is registered or bound |
//! | `singleton(id, factory)` | Shared binding, cached after first resolution |
//! | `bind(id, factory)` | Transient binding |
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use lifecycle_container::{factory, Container, ContainerExt, InMemoryContainer};
//!
//! let container = InMemoryContainer::new();
//! container.singleton("greeting", factory(|_, _| Ok(Arc::new("hello".to_string()))));
//!
//! let greeting: String = container.make_as("greeting", &[]).unwrap();
//! assert_eq!(greeting, "hello");
//! ```

pub mod argument;
pub mod container;
pub mod error;
pub mod memory;

pub use argument::{Argument, ResolvedArgument, SERVICE_REFERENCE_KEY};
pub use container::{factory, service, Container, ContainerExt, Factory, Instance};
pub use error::ContainerError;
pub use memory::InMemoryContainer;
