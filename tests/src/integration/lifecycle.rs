//! # Full Lifecycle Scenarios
//!
//! Construction → init → bootstrap → run → terminate with every
//! collaborator bound, plus the state guards between steps.

#[cfg(test)]
mod tests {
    use std::path::MAIN_SEPARATOR;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use lifecycle_container::{service, Container, InMemoryContainer};
    use lifecycle_runtime::{
        keys, ApplicationController, ApplicationError, ApplicationState, BootstrapSpec, Kernel,
        StartupContext,
    };
    use serde_json::json;

    use crate::fixtures::{container_with_config, FLAG_BOOTSTRAPPER};

    #[derive(Default)]
    struct CountingKernel {
        handled: AtomicUsize,
        terminated: AtomicUsize,
    }

    impl Kernel for CountingKernel {
        fn handle(&self, _app: &ApplicationController) -> Result<(), ApplicationError> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn terminate(&self, _app: &ApplicationController) -> Result<(), ApplicationError> {
            self.terminated.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct FailingKernel;

    impl Kernel for FailingKernel {
        fn handle(&self, _app: &ApplicationController) -> Result<(), ApplicationError> {
            Err(ApplicationError::unit("kernel", "request rejected"))
        }
    }

    #[test]
    fn test_full_lifecycle() {
        let (container, _) = container_with_config(json!({
            "debug": true,
            "bootstrappers": [FLAG_BOOTSTRAPPER]
        }));
        let kernel = Arc::new(CountingKernel::default());
        container.instance(keys::KERNEL_CONTRACT, service::<dyn Kernel>(kernel.clone()));

        let app = ApplicationController::new(container, "/srv/app", None);
        assert_eq!(app.state(), ApplicationState::Constructed);

        app.init().unwrap();
        assert_eq!(app.state(), ApplicationState::Initialized);
        assert!(app.is_debug_mode());

        assert_eq!(app.bootstrap(BootstrapSpec::default()).unwrap(), 1);
        assert_eq!(app.state(), ApplicationState::Bootstrapped);

        app.run().unwrap();
        assert_eq!(app.state(), ApplicationState::Running);

        app.terminate().unwrap();
        assert_eq!(app.state(), ApplicationState::Terminated);

        assert_eq!(kernel.handled.load(Ordering::SeqCst), 1);
        assert_eq!(kernel.terminated.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_bootstrap_without_init() {
        let app = ApplicationController::new(Arc::new(InMemoryContainer::new()), "/srv/app", None);
        app.bootstrap(None::<&str>).unwrap();
        app.run().unwrap();
        assert_eq!(app.state(), ApplicationState::Running);
    }

    #[test]
    fn test_init_without_config_is_resolution_error() {
        let app = ApplicationController::new(Arc::new(InMemoryContainer::new()), "/srv/app", None);
        assert!(matches!(app.init(), Err(ApplicationError::Container(_))));
    }

    #[test]
    fn test_state_guards() {
        let app = ApplicationController::new(Arc::new(InMemoryContainer::new()), "/srv/app", None);

        assert!(matches!(
            app.terminate(),
            Err(ApplicationError::InvalidTransition {
                from: ApplicationState::Constructed,
                operation: "terminate"
            })
        ));

        app.bootstrap(None::<&str>).unwrap();
        app.run().unwrap();
        assert!(app.run().is_err());
        app.terminate().unwrap();

        assert!(app.init().is_err());
        assert!(app.bootstrap(None::<&str>).is_err());
        assert!(app.terminate().is_err());
    }

    #[test]
    fn test_kernel_failure_keeps_running_state() {
        let container = Arc::new(InMemoryContainer::new());
        container.instance(
            keys::KERNEL_CONTRACT,
            service::<dyn Kernel>(Arc::new(FailingKernel)),
        );

        let app = ApplicationController::new(container, "/srv/app", None);
        app.bootstrap(None::<&str>).unwrap();

        let err = app.run().unwrap_err();
        assert_eq!(err, ApplicationError::unit("kernel", "request rejected"));
        assert_eq!(app.state(), ApplicationState::Running);
        app.terminate().unwrap();
    }

    #[test]
    fn test_reinit_does_not_move_backward() {
        let (container, config) = container_with_config(json!({}));
        let app = ApplicationController::new(container, "/srv/app", None);
        app.init().unwrap();
        app.bootstrap(None::<&str>).unwrap();

        app.init().unwrap();
        assert_eq!(app.state(), ApplicationState::Bootstrapped);
        // Already loaded, not forced.
        assert_eq!(config.loads(), 1);
    }

    #[test]
    fn test_paths() {
        let app = ApplicationController::new(
            Arc::new(InMemoryContainer::new()),
            "/srv/app",
            Some(StartupContext::now()),
        );
        assert_eq!(app.path("cache"), format!("/srv/app{MAIN_SEPARATOR}cache"));
        assert_eq!(app.path(None), "/srv/app");

        let app = ApplicationController::new(Arc::new(InMemoryContainer::new()), "C:\\app\\", None);
        assert_eq!(app.base_path(), "C:\\app");
    }

    #[test]
    fn test_controller_is_resolvable_from_factories() {
        let container = Arc::new(InMemoryContainer::new());
        let app = ApplicationController::new(container.clone(), "/srv/app", None);

        assert!(container.has(keys::APP));
        drop(app);
        // The registered handle is weak: the controller is gone.
        let handle = container.make(keys::APP, &[]).unwrap();
        let handle = handle
            .downcast_ref::<lifecycle_runtime::ApplicationRef>()
            .unwrap();
        assert!(handle.upgrade().is_none());
    }
}
