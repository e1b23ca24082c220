//! # Wait-Bridge Benchmarks
//!
//! Round-trip cost of the bridge itself: submit a request against an
//! immediately-replying processor and await the settled future.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

use bridge_bus::spawn_processor_fn;
use wait_broker::{WaitBroker, WaitRequest};

fn bench_submit_roundtrip(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    let broker = WaitBroker::new();
    let echo = {
        let _guard = rt.enter();
        spawn_processor_fn("echo", |n: u64| async move { n })
    };

    c.bench_function("submit_roundtrip", |b| {
        b.iter(|| {
            rt.block_on(async {
                let future = broker.submit(WaitRequest::new(
                    echo.clone(),
                    black_box(42u64),
                    Duration::from_secs(5),
                ));
                future.result().await.expect("echo reply")
            })
        })
    });
}

fn bench_concurrent_submissions(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().expect("runtime");
    let broker = WaitBroker::new();

    let mut group = c.benchmark_group("concurrent_submissions");
    for count in [10usize, 100, 1000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                rt.block_on(async {
                    let echo = spawn_processor_fn("echo", |n: u64| async move { n });
                    let futures: Vec<_> = (0..count as u64)
                        .map(|n| {
                            broker.submit(WaitRequest::new(
                                echo.clone(),
                                n,
                                Duration::from_secs(5),
                            ))
                        })
                        .collect();
                    for (n, future) in futures.iter().enumerate() {
                        assert_eq!(future.result().await.expect("echo reply"), n as u64);
                    }
                })
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_submit_roundtrip,
    bench_concurrent_submissions
);
criterion_main!(benches);
