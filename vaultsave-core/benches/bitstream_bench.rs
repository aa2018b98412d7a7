//! Benchmarks for bit-level I/O throughput.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use std::io::Cursor;
use vaultsave_core::bitstream::{BitReader, BitWriter};

fn bench_write_bits(c: &mut Criterion) {
    c.bench_function("bitwriter_write_bits_1mb", |b| {
        b.iter(|| {
            let mut output = Vec::with_capacity(1 << 20);
            let mut writer = BitWriter::new(&mut output);
            for i in 0..(1 << 18) {
                writer.write_bits(black_box(i as u32 & 0x3FF), 10).unwrap();
            }
            writer.flush().unwrap();
            black_box(output);
        })
    });
}

fn bench_read_bits(c: &mut Criterion) {
    let mut data = Vec::new();
    {
        let mut writer = BitWriter::new(&mut data);
        for i in 0..(1 << 18) {
            writer.write_bits(i as u32 & 0x3FF, 10).unwrap();
        }
        writer.flush().unwrap();
    }

    c.bench_function("bitreader_read_bits_1mb", |b| {
        b.iter(|| {
            let mut reader = BitReader::new(Cursor::new(&data));
            let mut sum = 0u64;
            for _ in 0..(1 << 18) {
                sum = sum.wrapping_add(reader.read_bits(10).unwrap() as u64);
            }
            black_box(sum);
        })
    });
}

criterion_group!(benches, bench_write_bits, bench_read_bits);
criterion_main!(benches);
