//! Criterion benchmarks for rust_log_router

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_router::prelude::*;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

/// Registry whose router fans out to `sinks` discarding console sinks
fn discard_registry(root: LogLevel, sinks: usize) -> Arc<LoggerRegistry> {
    let router = Arc::new(LogRouter::new());
    router
        .configure_once_with(|| {
            Ok((0..sinks)
                .map(|i| {
                    Sink::new(format!("sink-{}", i), ConsoleAppender::with_writer(std::io::sink()))
                })
                .collect())
        })
        .expect("Failed to configure router");
    Arc::new(LoggerRegistry::new(router, root))
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");
    group.throughput(Throughput::Elements(1));

    let registry = discard_registry(LogLevel::Info, 1);
    registry.get("orchestrator.scheduler.queue", None);

    group.bench_function("get_existing", |b| {
        b.iter(|| black_box(registry.get(black_box("orchestrator.scheduler.queue"), None)));
    });

    let logger = registry.get("orchestrator.scheduler.queue", None);
    group.bench_function("effective_level_cached", |b| {
        b.iter(|| black_box(logger.effective_level()));
    });

    group.bench_function("effective_level_after_set", |b| {
        b.iter(|| {
            registry.set_level("orchestrator", LogLevel::Info);
            black_box(logger.effective_level())
        });
    });

    group.finish();
}

// ============================================================================
// Routing Benchmarks
// ============================================================================

fn bench_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("routing");
    group.throughput(Throughput::Elements(1));

    let quiet = discard_registry(LogLevel::Warning, 4).get("deployer", None);
    group.bench_function("below_threshold", |b| {
        b.iter(|| quiet.debug(black_box("Dropped before routing")));
    });

    for sinks in [1, 4] {
        let logger = discard_registry(LogLevel::Debug, sinks).get("deployer", None);
        group.bench_function(format!("fan_out_{}_sinks", sinks), |b| {
            b.iter(|| logger.info(black_box("Deploying build 42")));
        });
    }

    let record = LogRecord::new("deployer", LogLevel::Info, "Deploying build 42");
    let standard = Formatter::standard();
    group.bench_function("format_standard", |b| {
        b.iter(|| black_box(standard.format(black_box(&record))));
    });

    group.finish();
}

fn bench_rotating_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotating_file");
    group.throughput(Throughput::Elements(1));

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let record = LogRecord::new("deployer", LogLevel::Info, "Deploying build 42");
    let line = Formatter::standard().format(&record);

    group.bench_function("append_64k_segments", |b| {
        let policy = RotationPolicy::new().with_max_bytes(64 * 1024).with_max_backups(2);
        let mut appender =
            RotatingFileAppender::with_policy(temp_dir.path().join("bench.log"), policy)
                .expect("Failed to create appender");
        b.iter(|| appender.append(black_box(&record), black_box(&line)));
    });

    group.finish();
}

fn bench_concurrent_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_routing");

    for threads in [2, 4, 8] {
        let registry = discard_registry(LogLevel::Debug, 2);
        group.throughput(Throughput::Elements(threads as u64 * 100));
        group.bench_function(format!("{}_threads_x_100", threads), |b| {
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let registry = Arc::clone(&registry);
                        thread::spawn(move || {
                            let logger = registry.get(&format!("worker.{}", t), None);
                            for i in 0..100 {
                                logger.info(format!("Step {}", i));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    let _ = handle.join();
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_registry,
    bench_routing,
    bench_rotating_file,
    bench_concurrent_routing
);

criterion_main!(benches);
