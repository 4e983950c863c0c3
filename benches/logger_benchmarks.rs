//! Criterion benchmarks for callsite_logger

use callsite_logger::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;

/// Discards everything; isolates dispatch cost from I/O.
struct NullAppender;

impl Appender for NullAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        black_box(entry);
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

/// Renders but does not write.
struct RenderOnlyAppender(OutputFormat);

impl Appender for RenderOnlyAppender {
    fn append(&self, entry: &LogEntry) -> Result<()> {
        black_box(self.0.render(entry)?);
        Ok(())
    }

    fn name(&self) -> &str {
        "render-only"
    }
}

fn bench_level_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_gate");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder()
        .min_level(LogLevel::Error)
        .appender(NullAppender)
        .build()
        .unwrap();

    group.bench_function("suppressed_debug", |b| {
        b.iter(|| logger.debug(black_box("Debug message"), None));
    });

    group.bench_function("suppressed_macro_with_args", |b| {
        b.iter(|| callsite_logger::debug!(logger, "value {}", black_box(42)));
    });

    group.finish();
}

fn bench_sync_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_dispatch");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder().appender(NullAppender).build().unwrap();

    group.bench_function("info", |b| {
        b.iter(|| logger.info(black_box("Info message"), None));
    });

    group.bench_function("info_with_payload", |b| {
        b.iter(|| {
            logger.info(
                black_box("Info message"),
                Some(Payload::new().with_field("user_id", 42).with_field("route", "/api")),
            )
        });
    });

    group.finish();
}

fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    group.throughput(Throughput::Elements(1));

    for (name, format) in [("text", OutputFormat::Text), ("json", OutputFormat::Json)] {
        let logger = Logger::builder()
            .appender(RenderOnlyAppender(format))
            .build()
            .unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                logger.warn(
                    black_box("Rendered message"),
                    Some(Payload::new().with_field("attempt", 3)),
                )
            });
        });
    }

    group.finish();
}

fn bench_async_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("async_throughput");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(20);

    group.bench_function("single_producer_1000", |b| {
        b.iter(|| {
            let logger = Logger::builder()
                .async_mode(DEFAULT_QUEUE_CAPACITY)
                .appender(NullAppender)
                .build()
                .unwrap();
            for i in 0..1000 {
                logger.info(black_box(format!("Message {}", i)), None);
            }
            logger.close();
        });
    });

    group.bench_function("four_producers_1000", |b| {
        b.iter(|| {
            let logger = Arc::new(
                Logger::builder()
                    .async_mode(DEFAULT_QUEUE_CAPACITY)
                    .appender(NullAppender)
                    .build()
                    .unwrap(),
            );
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        for i in 0..250 {
                            logger.info(black_box(format!("Message {}", i)), None);
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
            logger.close();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_level_gate,
    bench_sync_dispatch,
    bench_rendering,
    bench_async_throughput,
);
criterion_main!(benches);
