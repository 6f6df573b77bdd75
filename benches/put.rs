//! Put throughput benchmarks
//!
//! Measures bytes per second through `put` for chunk sizes around the
//! capacity, where the wrapped two-copy path dominates.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ringnes::ring::RingBuffer;

const CAPACITY: usize = 4096 * 1024;

fn put_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("put");

    for size in [64usize, 4088, 65_536, CAPACITY + 1] {
        let data = vec![0xA5u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("plain", size), &data, |b, data| {
            let mut ring = RingBuffer::new(CAPACITY).unwrap();
            b.iter(|| ring.put(black_box(data)))
        });

        #[cfg(target_os = "linux")]
        group.bench_with_input(BenchmarkId::new("mirrored", size), &data, |b, data| {
            let mut ring = ringnes::ring::MirroredRingBuffer::new(CAPACITY).unwrap();
            b.iter(|| ring.put(black_box(data)))
        });
    }

    group.finish();
}

fn reconstruct_benchmark(c: &mut Criterion) {
    let mut ring = RingBuffer::new(CAPACITY).unwrap();
    let chunk: Vec<i32> = (0..1022).collect();
    for _ in 0..1500 {
        ring.put_samples(&chunk);
    }

    c.bench_function("logical_samples_i32", |b| {
        b.iter(|| black_box(ring.view().samples::<i32>().unwrap()))
    });
}

criterion_group!(benches, put_benchmark, reconstruct_benchmark);
criterion_main!(benches);
