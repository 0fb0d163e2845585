//! # Service Accessor Scenarios
//!
//! Config fallbacks, logger caching, the exception handler and output mode.

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use lifecycle_container::{
        factory, service, Container, ContainerError, ContainerExt, InMemoryContainer,
    };
    use lifecycle_profiler::StackFrame;
    use lifecycle_runtime::keys::{self, action};
    use lifecycle_runtime::{
        ApplicationController, Config, ExceptionHandler, Logger, MemoryConfig, OutputMode,
        StartupContext,
    };
    use serde_json::json;
    use tracing::Level;

    use crate::fixtures::{container_with_config, TestHandler, TestLogger};

    // =============================================================================
    // CONFIG
    // =============================================================================

    #[test]
    fn test_config_default_without_binding() {
        let app = ApplicationController::new(Arc::new(InMemoryContainer::new()), "/srv/app", None);
        assert!(app.config().is_none());

        let config = app.config_or_else(|| {
            Arc::new(MemoryConfig::from_value(json!({"name": "fallback"}))) as Arc<dyn Config>
        });
        assert_eq!(config.get("name"), Some(json!("fallback")));
        assert_eq!(app.config_value("missing", json!(5)), json!(5));
    }

    #[test]
    fn test_config_after_init() {
        let (container, _) = container_with_config(json!({"cache": {"ttl": 60}}));
        let app = ApplicationController::new(container, "/srv/app", None);
        app.init().unwrap();

        assert_eq!(app.config_value("cache.ttl", json!(0)), json!(60));
        assert!(!app.is_debug_mode());
    }

    // =============================================================================
    // LOGGER
    // =============================================================================

    #[test]
    fn test_logger_made_once_and_cached() {
        let (container, _) = container_with_config(json!({}));
        container.bind(
            keys::LOGGER_CONTRACT,
            factory(|_, _| Ok(service::<dyn Logger>(Arc::new(TestLogger::default())))),
        );
        let app = ApplicationController::new(container.clone(), "/srv/app", None);
        app.init().unwrap();

        let first = app.log().unwrap();
        first.info("first");
        assert!(container.has(keys::LOGGER));

        let second = app.log().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let cached: Arc<dyn Logger> = container.make_as(keys::LOGGER, &[]).unwrap();
        cached.log(Level::WARN, "second", &serde_json::Map::new());
        assert!(Arc::ptr_eq(&first, &cached));
    }

    #[test]
    fn test_logger_records_actions() {
        let container = Arc::new(InMemoryContainer::new());
        container.bind(
            keys::LOGGER_CONTRACT,
            factory(|_, _| Ok(service::<dyn Logger>(Arc::new(TestLogger::default())))),
        );
        let app = ApplicationController::new(
            container,
            "/srv/app",
            Some(StartupContext::now().with_profiling(true)),
        );
        app.log().unwrap();

        let entries = app.profiling().unwrap();
        assert!(entries.iter().any(|e| e.action == action::LOGGER_MAKE));
        assert!(entries.iter().any(|e| e.action == action::LOGGER_GET));
    }

    #[test]
    fn test_logger_missing() {
        let app = ApplicationController::new(Arc::new(InMemoryContainer::new()), "/srv/app", None);
        assert_eq!(
            app.log().err(),
            Some(ContainerError::not_found(keys::LOGGER_CONTRACT))
        );
    }

    // =============================================================================
    // EXCEPTION HANDLER
    // =============================================================================

    #[test]
    fn test_handler_registered_at_construction() {
        let handler = Arc::new(TestHandler::default());
        let container = Arc::new(InMemoryContainer::new());
        let shared = handler.clone();
        container.singleton(
            keys::EXCEPTION_HANDLER_CONTRACT,
            factory(move |_, _| Ok(service::<dyn ExceptionHandler>(shared.clone()))),
        );

        let app = ApplicationController::new(container, "/srv/app", None);
        assert!(handler.registered.load(Ordering::SeqCst));
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
        assert!(app.exception_handler().unwrap().is_some());
    }

    #[test]
    fn test_handler_missing() {
        let app = ApplicationController::new(Arc::new(InMemoryContainer::new()), "/srv/app", None);
        assert!(app.exception_handler().unwrap().is_none());
    }

    #[test]
    fn test_broken_handler_does_not_abort_construction() {
        let container = Arc::new(InMemoryContainer::new());
        container.bind(
            keys::EXCEPTION_HANDLER_CONTRACT,
            factory(|_, _| Err(ContainerError::resolution("handler", "boom"))),
        );

        let app = ApplicationController::new(container, "/srv/app", None);
        assert!(app.exception_handler().is_err());
    }

    // =============================================================================
    // OUTPUT MODE
    // =============================================================================

    #[test]
    fn test_output_mode() {
        let app = ApplicationController::new(Arc::new(InMemoryContainer::new()), "/srv/app", None);
        assert_eq!(app.output_mode(), OutputMode::Http);

        app.set_output_mode(OutputMode::Json);
        assert_eq!(app.output_mode(), OutputMode::Json);
    }

    #[test]
    fn test_stacktrace_excludes_profiler_frames() {
        let app = ApplicationController::new(
            Arc::new(InMemoryContainer::new()),
            "/srv/app",
            Some(StartupContext::now().with_profiling(true)),
        );
        app.profiling_stop("traced");

        let entries = app.profiling().unwrap();
        let entry = entries.iter().find(|e| e.action == "traced").unwrap();
        if let Some(frames) = &entry.stacktrace {
            let first: Option<&StackFrame> = frames.first();
            assert!(first.map_or(true, |f| !f.function.starts_with("lifecycle_profiler::")));
        }
    }
}
