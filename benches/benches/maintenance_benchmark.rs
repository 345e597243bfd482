//! Feed, maintenance and query benchmarks.
//!
//! Run with: `cargo bench --package trendbar-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use trendbar_bench::{WorkloadConfig, generate_quotes, settle_time};
use trendbar_lib::{Instrument, ManualClock, Period, TrendBarService};

fn feed_and_maintain(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed_and_maintain");

    for quotes in [10_000, 100_000] {
        let workload = generate_quotes(&WorkloadConfig::default().with_quotes(quotes));
        let now = settle_time(&workload);
        group.throughput(Throughput::Elements(quotes as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(quotes),
            &workload,
            |b, workload| {
                b.iter(|| {
                    let service = TrendBarService::with_clock(Arc::new(ManualClock::new(now)));
                    for quote in workload {
                        service.feed_quote(quote.clone());
                    }
                    black_box(service.run_maintenance().unwrap())
                });
            },
        );
    }

    group.finish();
}

fn concurrent_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_feed");
    group.measurement_time(Duration::from_secs(10));
    let workload = generate_quotes(&WorkloadConfig::default());
    let now = settle_time(&workload);
    group.throughput(Throughput::Elements(workload.len() as u64));

    for producers in [1_usize, 4] {
        let chunk = workload.len().div_ceil(producers);
        group.bench_with_input(BenchmarkId::from_parameter(producers), &chunk, |b, &chunk| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let service = TrendBarService::with_clock(Arc::new(ManualClock::new(now)));
                    let done = AtomicBool::new(false);
                    let start = Instant::now();
                    thread::scope(|scope| {
                        let service = &service;
                        let done = &done;
                        let feeders: Vec<_> = workload
                            .chunks(chunk)
                            .map(|part| {
                                scope.spawn(move || {
                                    for quote in part {
                                        service.feed_quote(quote.clone());
                                    }
                                })
                            })
                            .collect();
                        let maintainer = scope.spawn(move || {
                            while !done.load(Ordering::Acquire) {
                                service.run_maintenance().unwrap();
                            }
                        });
                        for feeder in feeders {
                            feeder.join().unwrap();
                        }
                        done.store(true, Ordering::Release);
                        maintainer.join().unwrap();
                    });
                    service.run_maintenance().unwrap();
                    total += start.elapsed();
                }
                total
            });
        });
    }

    group.finish();
}

fn history_query(c: &mut Criterion) {
    let workload = generate_quotes(&WorkloadConfig::default().with_instruments(1));
    let service = TrendBarService::with_clock(Arc::new(ManualClock::new(settle_time(&workload))));
    for quote in &workload {
        service.feed_quote(quote.clone());
    }
    service.run_maintenance().unwrap();

    let instrument = Instrument::new("SYM000");
    let first = workload.first().map_or(0, |q| q.timestamp);
    let last = workload.last().map_or(0, |q| q.timestamp);
    let middle = first + (last - first) / 2;

    let mut group = c.benchmark_group("history");
    group.bench_function("m1_full", |b| {
        b.iter(|| black_box(service.history(&instrument, Period::M1, first, last + 86_400)));
    });
    group.bench_function("m1_hour", |b| {
        b.iter(|| black_box(service.history(&instrument, Period::M1, middle, middle + 3_600)));
    });
    group.finish();
}

criterion_group!(benches, feed_and_maintain, concurrent_feed, history_query);
criterion_main!(benches);
