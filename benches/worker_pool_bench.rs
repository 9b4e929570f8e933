//! Benchmarks for the worker pool, the deadline timer, and the executor
//! facade composing them.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use executor_core::{Executor, Timer};
use executor_core::config::ExecutorConfig;

// ============================================================================
// WorkerPool Benchmarks
// ============================================================================

fn bench_submit_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_pool_submit");

    for count in [100u64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let pool = executor_core::WorkerPool::new("bench-pool", 4, 256 * 1024);
                pool.start().unwrap();
                let counter = Arc::new(AtomicU64::new(0));
                for _ in 0..count {
                    let counter = Arc::clone(&counter);
                    pool.submit(Box::new(move || {
                        counter.fetch_add(1, Ordering::Relaxed);
                    }))
                    .unwrap();
                }
                pool.stop();
                black_box(counter.load(Ordering::Relaxed));
            });
        });
    }
    group.finish();
}

fn bench_submit_with_result(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_pool_submit_with_result");

    for count in [100u64, 1_000] {
        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let pool = executor_core::WorkerPool::new("bench-result-pool", 4, 256 * 1024);
            pool.start().unwrap();
            b.iter(|| {
                let handles: Vec<_> = (0..count)
                    .map(|i| pool.submit_with_result(move || i * 2).unwrap())
                    .collect();
                for handle in handles {
                    black_box(handle.wait().unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_pool_worker_count_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_pool_worker_count");

    for workers in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| {
                let pool = executor_core::WorkerPool::new("bench-scale-pool", workers, 256 * 1024);
                pool.start().unwrap();
                let counter = Arc::new(AtomicU64::new(0));
                for _ in 0..1_000 {
                    let counter = Arc::clone(&counter);
                    pool.submit(Box::new(move || {
                        counter.fetch_add(1, Ordering::Relaxed);
                    }))
                    .unwrap();
                }
                pool.stop();
                black_box(counter.load(Ordering::Relaxed));
            });
        });
    }
    group.finish();
}

// ============================================================================
// Timer Benchmarks
// ============================================================================

fn bench_timer_post_delayed(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer_post_delayed");

    group.bench_function("schedule_one_hundred_near_term_entries", |b| {
        let timer = Timer::new(2, 256 * 1024);
        timer.start().unwrap();
        b.iter(|| {
            for _ in 0..100 {
                timer.post_delayed(Box::new(|| {}), Duration::from_secs(60));
            }
        });
    });
    group.finish();
}

fn bench_timer_cancel(c: &mut Criterion) {
    let mut group = c.benchmark_group("timer_cancel");

    group.bench_function("schedule_then_cancel_one_hundred", |b| {
        let timer = Timer::new(2, 256 * 1024);
        timer.start().unwrap();
        b.iter(|| {
            let ids: Vec<_> = (0..100)
                .map(|_| timer.post_repeated(|| {}, Duration::from_secs(60), 1))
                .collect();
            for id in ids {
                timer.cancel_repeated(id);
            }
        });
    });
    group.finish();
}

// ============================================================================
// Executor End-to-End Benchmarks
// ============================================================================

fn bench_executor_post(c: &mut Criterion) {
    let mut group = c.benchmark_group("executor_post");

    group.bench_function("post_one_thousand_to_one_runner", |b| {
        let executor = Executor::new(ExecutorConfig {
            default_pool_size: 4,
            timer_helper_pool_size: 1,
            worker_stack_size: 256 * 1024,
        });
        let tag = executor.add_runner().unwrap();

        b.iter(|| {
            let handles: Vec<_> = (0..1_000)
                .map(|i| executor.post_with_result(tag, move || i).unwrap())
                .collect();
            for handle in handles {
                black_box(handle.wait().unwrap());
            }
        });
    });
    group.finish();
}

criterion_group!(
    worker_pool_benches,
    bench_submit_throughput,
    bench_submit_with_result,
    bench_pool_worker_count_scaling
);

criterion_group!(timer_benches, bench_timer_post_delayed, bench_timer_cancel);

criterion_group!(executor_benches, bench_executor_post);

criterion_main!(worker_pool_benches, timer_benches, executor_benches);
