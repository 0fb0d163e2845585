//! # Lifecycle Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Profiler | start/stop pair on an enabled local session |
//! | Profiler | start/stop pair on a disabled session (no-op path) |
//! | Bootstrap | pipeline over N registering units |

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lifecycle_container::{factory, service, Container, InMemoryContainer, Instance};
use lifecycle_profiler::{
    FixedMemory, MonotonicTimeSource, ProfilerExt, ProfilerProxy, ProfilingSession,
};
use lifecycle_runtime::{
    ApplicationController, ApplicationError, BootstrapUnit, Registrations, UnitSpec,
};

// ============================================================================
// Profiler
// ============================================================================

fn bench_profiler_start_stop(c: &mut Criterion) {
    let mut group = c.benchmark_group("profiler");

    for enabled in [true, false] {
        let proxy = ProfilerProxy::local(ProfilingSession::with_sources(
            MonotonicTimeSource::default(),
            FixedMemory(0),
            enabled,
        ));
        let label = if enabled { "enabled" } else { "disabled" };

        group.bench_function(BenchmarkId::new("start_stop", label), |b| {
            b.iter(|| {
                proxy.start_now(black_box("bench.action"));
                proxy.stop_now(black_box("bench.action"));
            })
        });
    }

    group.finish();
}

// ============================================================================
// Bootstrap
// ============================================================================

struct NoopUnit(String);

impl BootstrapUnit for NoopUnit {
    fn bootstrap(&self, _app: &ApplicationController) -> Result<Option<Registrations>, ApplicationError> {
        let value: Instance = Arc::new(());
        Ok(Some(vec![(self.0.clone(), value)]))
    }
}

fn bench_bootstrap_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("bootstrap");

    for size in [1usize, 10, 50] {
        let container = Arc::new(InMemoryContainer::new());
        let units: Vec<UnitSpec> = (0..size)
            .map(|i| {
                let id = format!("unit.{i}");
                let key = format!("unit.{i}.done");
                container.bind(
                    &id,
                    factory(move |_, _| {
                        Ok(service::<dyn BootstrapUnit>(Arc::new(NoopUnit(key.clone()))))
                    }),
                );
                UnitSpec::new(id)
            })
            .collect();
        let app = ApplicationController::new(container, "/srv/bench", None);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("units", size), &units, |b, units| {
            b.iter(|| app.bootstrap(units.clone()).map(black_box))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_profiler_start_stop, bench_bootstrap_pipeline);
criterion_main!(benches);
