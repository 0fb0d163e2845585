//! Resolution container capability.
//!
//! The container is an external collaborator of the lifecycle core: the
//! core only consumes this trait. Instances are type-erased
//! (`Arc<dyn Any + Send + Sync>`) and resolved by string identifier;
//! typed access goes through [`ContainerExt`].
//!
//! ## Conventions
//!
//! - Concrete types are stored as-is: `Arc::new(value)`, read back with
//!   [`ContainerExt::make_arc`] or [`ContainerExt::make_as`].
//! - Trait objects are wrapped with [`service`], read back with
//!   `make_as::<Arc<dyn Trait>>()`.

use std::any::{type_name, Any};
use std::sync::Arc;

use crate::argument::{Argument, ResolvedArgument};
use crate::error::ContainerError;

/// Type-erased service instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Service factory. Receives the container (for nested resolution) and the
/// resolved constructor arguments.
pub type Factory =
    Arc<dyn Fn(&dyn Container, &[ResolvedArgument]) -> Result<Instance, ContainerError> + Send + Sync>;

/// Wrap a shared trait object so it can be stored as an [`Instance`] and
/// downcast back to `Arc<T>`.
pub fn service<T>(value: Arc<T>) -> Instance
where
    T: ?Sized + Send + Sync + 'static,
{
    Arc::new(value)
}

/// Build a [`Factory`] from a closure.
pub fn factory<F>(f: F) -> Factory
where
    F: Fn(&dyn Container, &[ResolvedArgument]) -> Result<Instance, ContainerError>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// Resolution container capability.
pub trait Container: Send + Sync {
    /// Resolve `id`, passing `args` as constructor arguments.
    ///
    /// Registered instances take precedence over bindings.
    fn make(&self, id: &str, args: &[Argument]) -> Result<Instance, ContainerError>;

    /// Register a named instance, replacing any previous one.
    fn instance(&self, key: &str, value: Instance);

    /// Check whether `id` can be resolved.
    fn has(&self, id: &str) -> bool;

    /// Bind a shared factory; the first resolution is cached.
    fn singleton(&self, id: &str, factory: Factory);

    /// Bind a transient factory; every resolution runs it.
    fn bind(&self, id: &str, factory: Factory);
}

/// Typed helpers over [`Container`].
pub trait ContainerExt: Container {
    /// Resolve `id` and clone out a value of type `T`.
    fn make_as<T: Any + Send + Sync + Clone>(
        &self,
        id: &str,
        args: &[Argument],
    ) -> Result<T, ContainerError> {
        let instance = self.make(id, args)?;
        instance
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| ContainerError::TypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>(),
            })
    }

    /// Resolve `id` as a shared concrete instance.
    fn make_arc<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>, ContainerError> {
        self.make(id, &[])?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                id: id.to_string(),
                expected: type_name::<T>(),
            })
    }
}

impl<C: Container + ?Sized> ContainerExt for C {}
