//! Benchmarks for a full mutation pass over a synthetic player record.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vaultsave_core::Endian;
use vaultsave_data::{GAME_A, SAMPLE_CHALLENGES};
use vaultsave_mutate::{Config, apply};
use vaultsave_proto::{FieldValue, PlayerRecord, record};

fn sample_item_entry(level: u64) -> Vec<u8> {
    let values: Vec<Option<u64>> = (0..17)
        .map(|i| if i == 4 || i == 5 { Some(level) } else { Some(1) })
        .collect();
    let raw = vaultsave_item::wrap_item(false, &values, 42, GAME_A.item_struct_version);
    let mut entry = PlayerRecord::new();
    entry.insert(1, vec![FieldValue::Bytes(raw)]);
    record::encode(&entry)
}

fn sample_player() -> PlayerRecord {
    let mut player = PlayerRecord::new();
    player.insert(2, vec![FieldValue::Varint(10)]);
    player.insert(3, vec![FieldValue::Varint(49_377)]);
    player.insert(
        6,
        vec![FieldValue::Bytes(record::write_repeated(&[
            FieldValue::Varint(500),
            FieldValue::Varint(10),
            FieldValue::Varint(0),
            FieldValue::Varint(0),
            FieldValue::Varint(0),
        ]))],
    );
    player.insert(7, vec![FieldValue::Varint(0)]);

    let mut slots = PlayerRecord::new();
    slots.insert(1, vec![FieldValue::Varint(15)]);
    slots.insert(2, vec![FieldValue::Varint(4)]);
    slots.insert(3, vec![FieldValue::Varint(2)]);
    player.insert(13, vec![FieldValue::Bytes(record::encode(&slots))]);

    let log = vaultsave_challenge::ChallengeLog {
        unknown: 4,
        entries: (1..=5)
            .map(|id| vaultsave_challenge::ChallengeEntry {
                id,
                first_one: 6,
                total_value: 100,
                second_one: 1,
                previous_value: 0,
            })
            .collect(),
    };
    player.insert(
        15,
        vec![FieldValue::Bytes(vaultsave_challenge::encode(&log, Endian::Little))],
    );

    player.insert(
        53,
        (0..20).map(|_| FieldValue::Bytes(sample_item_entry(1))).collect(),
    );

    player
}

fn bench_apply_level_and_currency(c: &mut Criterion) {
    let config = Config {
        level: Some(40),
        money: Some(1_000_000),
        eridium: Some(500),
        ..Default::default()
    };
    c.bench_function("mutate_apply_level_and_currency", |b| {
        b.iter(|| {
            let mut player = sample_player();
            apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, black_box(&mut player)).unwrap();
        })
    });
}

fn bench_apply_full(c: &mut Criterion) {
    let mut challenges = std::collections::HashSet::new();
    challenges.insert(vaultsave_mutate::ChallengeOp::Max);
    let config = Config {
        level: Some(40),
        itemlevels: Some(40),
        forceitemlevels: true,
        maxammo: true,
        challenges,
        ..Default::default()
    };
    c.bench_function("mutate_apply_full", |b| {
        b.iter(|| {
            let mut player = sample_player();
            apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, black_box(&mut player)).unwrap();
        })
    });
}

criterion_group!(benches, bench_apply_level_and_currency, bench_apply_full);
criterion_main!(benches);
