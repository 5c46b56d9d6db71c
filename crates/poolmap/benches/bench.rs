use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use poolmap::{MapConfig, map};
use std::hint::black_box;
use std::time::Duration;

// Number of elements mapped per benchmark iteration
const TOTAL_ITEMS: usize = 4096;

/// Benchmark `map` with an operation of the given cost across pool sizes
fn bench_map(c: &mut Criterion, group_name: &str, op: impl Fn(u64) -> Result<u64, String> + Sync) {
    let mut group = c.benchmark_group(group_name);

    for workers in [1, 2, 4, 8, 16] {
        let config = MapConfig::new(workers).with_silent(true);
        group.throughput(Throughput::Elements(TOTAL_ITEMS as u64));
        group.bench_function(
            format!("elems/{}/workers/{}", TOTAL_ITEMS, workers),
            |b| {
                b.iter(|| {
                    let inputs: Vec<u64> = (0..TOTAL_ITEMS as u64).collect();
                    black_box(map(inputs, &op, &config).unwrap());
                });
            },
        );
    }

    group.finish();
}

/// Pure dispatch overhead: the operation does no work
fn benchmark_map_identity(c: &mut Criterion) {
    bench_map(c, "map/identity", |x| Ok(black_box(x)));
}

/// CPU-bound operation
fn benchmark_map_cpu(c: &mut Criterion) {
    bench_map(c, "map/cpu", |x| {
        let mut acc = x;
        for _ in 0..1_000 {
            acc = acc.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        }
        Ok(black_box(acc))
    });
}

/// Blocking operation, where pool size bounds throughput
fn benchmark_map_blocking(c: &mut Criterion) {
    bench_map(c, "map/blocking", |x| {
        std::thread::sleep(Duration::from_micros(10));
        Ok(x)
    });
}

criterion_group!(
    benches,
    benchmark_map_identity,
    benchmark_map_cpu,
    benchmark_map_blocking
);
criterion_main!(benches);
