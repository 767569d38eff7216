//! Criterion benchmarks for rust_log_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_facade::prelude::*;
use rust_log_facade::Record;

/// Accepts and drops every line
struct Discard;

impl Appender for Discard {
    fn append(&mut self, line: &[u8]) -> Result<()> {
        black_box(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "discard"
    }
}

fn discarding_facade(level: Level) -> Facade {
    let log = Facade::new();
    log.set_level(level);
    Config::new()
        .build_with_console(&log, Discard)
        .expect("console-only build cannot fail");
    log
}

// ============================================================================
// Facade Creation Benchmarks
// ============================================================================

fn bench_facade_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("facade_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("new", |b| {
        b.iter(|| black_box(Facade::new()));
    });

    group.bench_function("build_console", |b| {
        let log = Facade::new();
        b.iter(|| {
            Config::new().build_with_console(&log, Discard).unwrap();
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    let log = discarding_facade(Level::Debug);

    group.bench_function("debug", |b| {
        b.iter(|| log.debug(black_box("Debug message")));
    });

    group.bench_function("info", |b| {
        b.iter(|| log.info(black_box("Info message")));
    });

    group.bench_function("info_fmt", |b| {
        b.iter(|| log.info_fmt(format_args!("Processed {} items", black_box(128))));
    });

    group.bench_function("error", |b| {
        b.iter(|| log.error(black_box("Error message")));
    });

    let handle = log.with("request_id", 42).with("path", "/api/orders");
    group.bench_function("handle_with_two_fields", |b| {
        b.iter(|| handle.info(black_box("Handled request")));
    });

    group.bench_function("derive_handle", |b| {
        b.iter(|| black_box(log.with("user", black_box("ada"))));
    });

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let log = discarding_facade(Level::Info);

    group.bench_function("multi_thread_4", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|worker| {
                    let handle = log.with("worker", worker);
                    std::thread::spawn(move || {
                        handle.info(black_box("Concurrent message"));
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    group.throughput(Throughput::Elements(1));

    let encoder = EncoderConfig::default();
    let empty = Fields::new();
    let fields = Fields::new()
        .with_field("user_id", 12345)
        .with_field("latency_ms", 3.25)
        .with_field("cached", false);

    group.bench_function("no_fields", |b| {
        b.iter(|| black_box(encoder.encode(&Record::new(Level::Info, "Test message", &empty))));
    });

    group.bench_function("three_fields", |b| {
        b.iter(|| black_box(encoder.encode(&Record::new(Level::Info, "Test message", &fields))));
    });

    group.finish();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let log = discarding_facade(Level::Warn);

    group.bench_function("below_threshold", |b| {
        b.iter(|| log.debug(black_box("This should be filtered")));
    });

    group.bench_function("below_threshold_fmt", |b| {
        b.iter(|| log.debug_fmt(format_args!("filtered {}", black_box(7))));
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| log.error(black_box("This should be logged")));
    });

    group.finish();
}

// ============================================================================
// File Benchmarks
// ============================================================================

fn bench_rotating_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotating_file");
    group.throughput(Throughput::Elements(1));

    let dir = tempfile::tempdir().unwrap();
    let log = Facade::new();
    Config::new()
        .with_file(
            RotatingFileConfig::new(dir.path().join("bench.log"))
                .with_max_size(1024 * 1024)
                .with_max_backups(2),
        )
        .with_error_file(true)
        .build_with_console(&log, Discard)
        .unwrap();

    group.bench_function("info_to_file", |b| {
        b.iter(|| log.info(black_box("File message")));
    });

    group.bench_function("error_to_both_files", |b| {
        b.iter(|| log.error(black_box("Error message")));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_facade_creation,
    bench_emission,
    bench_concurrent_logging,
    bench_encoding,
    bench_level_filtering,
    bench_rotating_file
);

criterion_main!(benches);
