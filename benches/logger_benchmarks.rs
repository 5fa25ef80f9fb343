//! Criterion benchmarks for tasklogger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;
use tasklogger::prelude::*;
use tasklogger::should_emit;

fn capture_logger(registry: &LoggerRegistry, name: &str, level: i32) -> (TaskLogger, StringSink) {
    let output = StringSink::new();
    let logger = TaskLogger::builder()
        .name(name)
        .level(level)
        .stream(output.clone())
        .min_runtime(Duration::ZERO)
        .build_in(registry)
        .unwrap();
    (logger, output)
}

// ============================================================================
// Message Benchmarks
// ============================================================================

fn bench_messages(c: &mut Criterion) {
    let mut group = c.benchmark_group("messages");
    group.throughput(Throughput::Elements(1));
    let registry = LoggerRegistry::new();

    let (logger, output) = capture_logger(&registry, "emitted", 1);
    group.bench_function("log_info_emitted", |b| {
        b.iter(|| {
            logger.log_info(black_box("Benchmark message")).unwrap();
            output.clear();
        });
    });

    let (filtered, _) = capture_logger(&registry, "filtered", -1);
    group.bench_function("log_debug_filtered", |b| {
        b.iter(|| {
            filtered.log_debug(black_box("Filtered message")).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Task Timing Benchmarks
// ============================================================================

fn bench_task_timing(c: &mut Criterion) {
    let mut group = c.benchmark_group("task_timing");
    group.throughput(Throughput::Elements(1));
    let registry = LoggerRegistry::new();

    for timer in ["wall", "cpu-or-wall"] {
        let (logger, output) = capture_logger(&registry, timer, 1);
        logger.set_timer(timer).unwrap();
        group.bench_with_input(BenchmarkId::new("start_complete", timer), &logger, |b, logger| {
            b.iter(|| {
                logger.start_task(black_box("task")).unwrap();
                black_box(logger.complete_task("task").unwrap());
                output.clear();
            });
        });
    }

    let (logger, output) = capture_logger(&registry, "scoped", 1);
    group.bench_function("with_task", |b| {
        b.iter(|| {
            black_box(logger.with_task("scoped", || 1 + 1).unwrap());
            output.clear();
        });
    });

    group.finish();
}

fn bench_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting");
    let registry = LoggerRegistry::new();

    for depth in [1usize, 4, 16] {
        let name = format!("depth-{}", depth);
        let (logger, output) = capture_logger(&registry, &name, 1);
        let tasks: Vec<String> = (0..depth).map(|i| format!("task{}", i)).collect();

        group.bench_with_input(BenchmarkId::from_parameter(depth), &tasks, |b, tasks| {
            b.iter(|| {
                for task in tasks {
                    logger.start_task(task).unwrap();
                }
                for task in tasks.iter().rev() {
                    logger.complete_task(task).unwrap();
                }
                output.clear();
            });
        });
    }

    group.finish();
}

// ============================================================================
// Level Benchmarks
// ============================================================================

fn bench_level_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("levels");

    group.bench_function("resolve_int", |b| {
        b.iter(|| LevelSpec::from(black_box(2)).resolve().unwrap());
    });

    group.bench_function("resolve_name", |b| {
        b.iter(|| LevelSpec::from(black_box("warning")).resolve().unwrap());
    });

    group.bench_function("should_emit", |b| {
        b.iter(|| should_emit(black_box(Severity::Debug), black_box(Severity::Info)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_messages,
    bench_task_timing,
    bench_nesting,
    bench_level_resolution,
);

criterion_main!(benches);
