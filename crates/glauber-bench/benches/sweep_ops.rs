//! Criterion benchmarks for the sweep kernel.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glauber_bench::critical_profile;

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for extent in [64u32, 256, 1024] {
        let (mut engine, mut lattice) = critical_profile(extent, 1);
        group.throughput(Throughput::Elements(
            u64::from(extent) * u64::from(extent),
        ));
        group.bench_with_input(BenchmarkId::from_parameter(extent), &extent, |b, _| {
            b.iter(|| engine.sweep(black_box(&mut lattice)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
