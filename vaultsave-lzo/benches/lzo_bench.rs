//! Benchmarks for block (de)compression throughput.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vaultsave_lzo::{compress_block, decompress_block};

fn sample_data() -> Vec<u8> {
    let mut data = Vec::with_capacity(1 << 20);
    let mut x: u32 = 0xC0FF_EE11;
    for _ in 0..(1 << 20) {
        x = x.wrapping_mul(1103515245).wrapping_add(12345);
        if (x >> 24) % 3 == 0 && data.len() >= 8 {
            let back = 1 + ((x >> 8) as usize % data.len().min(4000));
            let start = data.len() - back;
            data.push(data[start]);
        } else {
            data.push((x >> 16) as u8);
        }
    }
    data
}

fn bench_compress(c: &mut Criterion) {
    let data = sample_data();
    c.bench_function("lzo_compress_1mb", |b| {
        b.iter(|| {
            let compressed = compress_block(black_box(&data));
            black_box(compressed);
        })
    });
}

fn bench_decompress(c: &mut Criterion) {
    let data = sample_data();
    let compressed = compress_block(&data);
    c.bench_function("lzo_decompress_1mb", |b| {
        b.iter(|| {
            let decompressed = decompress_block(black_box(&compressed), data.len()).unwrap();
            black_box(decompressed);
        })
    });
}

criterion_group!(benches, bench_compress, bench_decompress);
criterion_main!(benches);
