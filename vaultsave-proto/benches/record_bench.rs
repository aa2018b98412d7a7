//! Benchmarks for field-record decode/encode throughput.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vaultsave_proto::record::{FieldValue, PlayerRecord, decode, encode};

fn sample_record() -> PlayerRecord {
    let mut record = PlayerRecord::new();
    for tag in 0..200u32 {
        record.insert(
            tag,
            vec![FieldValue::Varint(tag as u64 * 7), FieldValue::Bytes(vec![tag as u8; 16])],
        );
    }
    record
}

fn bench_encode(c: &mut Criterion) {
    let record = sample_record();
    c.bench_function("proto_encode_record", |b| {
        b.iter(|| black_box(encode(black_box(&record))))
    });
}

fn bench_decode(c: &mut Criterion) {
    let record = sample_record();
    let bytes = encode(&record);
    c.bench_function("proto_decode_record", |b| {
        b.iter(|| black_box(decode(black_box(&bytes)).unwrap()))
    });
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
