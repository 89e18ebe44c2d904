//! Throughput of composed pipelines against the equivalent iterator chains

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use transducers_core::sink::{append, sum};
use transducers_core::{compose, transduce, TransformChain};
use transducers_transforms::{dedupe, filtering, mapping, partition_all, taking};

const SIZES: [u64; 3] = [1_000, 10_000, 100_000];

fn bench_filter_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_map_sum");

    for size in SIZES {
        group.throughput(Throughput::Elements(size));

        group.bench_with_input(BenchmarkId::new("transduce", size), &size, |b, &size| {
            let xf = compose(filtering(|x: &u64| x % 3 == 0), mapping(|x: u64| x * x));
            b.iter(|| transduce(&xf, sum, 0u64, black_box(0..size)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("iterator", size), &size, |b, &size| {
            b.iter(|| {
                black_box(0..size)
                    .filter(|x| x % 3 == 0)
                    .map(|x| x * x)
                    .sum::<u64>()
            });
        });
    }

    group.finish();
}

fn bench_stateful(c: &mut Criterion) {
    let mut group = c.benchmark_group("stateful_stages");

    for size in SIZES {
        group.throughput(Throughput::Elements(size));

        group.bench_with_input(BenchmarkId::new("static", size), &size, |b, &size| {
            let xf = compose![
                mapping(|x: u64| x / 4),
                dedupe(),
                partition_all(16).unwrap(),
                taking(1_000),
            ];
            b.iter(|| transduce(&xf, append, Vec::new(), black_box(0..size)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("chain", size), &size, |b, &size| {
            let chain = TransformChain::<u64, u64>::new()
                .with_stage("quarter", mapping(|x: u64| x / 4))
                .with_stage("dedupe", dedupe());
            b.iter(|| transduce(&chain, sum, 0u64, black_box(0..size)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter_map, bench_stateful);
criterion_main!(benches);
