//! Benchmarks for prefix-code tree construction and (de)coding throughput.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vaultsave_prefix::{compress, decompress};

fn sample_data() -> Vec<u8> {
    let mut data = Vec::with_capacity(1 << 18);
    let mut x: u32 = 0xABCD_1234;
    for _ in 0..(1 << 18) {
        x = x.wrapping_mul(1103515245).wrapping_add(12345);
        data.push((x >> 24) as u8 % 40);
    }
    data
}

fn bench_compress(c: &mut Criterion) {
    let data = sample_data();
    c.bench_function("prefix_compress_256kb", |b| {
        b.iter(|| black_box(compress(black_box(&data)).unwrap()))
    });
}

fn bench_decompress(c: &mut Criterion) {
    let data = sample_data();
    let compressed = compress(&data).unwrap();
    c.bench_function("prefix_decompress_256kb", |b| {
        b.iter(|| black_box(decompress(black_box(&compressed), data.len()).unwrap()))
    });
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
