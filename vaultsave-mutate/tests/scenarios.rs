//! End-to-end mutation scenarios exercised against a synthetic player
//! record, since no real save file ships with this crate.

use std::collections::HashSet;

use vaultsave_core::Endian;
use vaultsave_data::{GAME_A, SAMPLE_CHALLENGES};
use vaultsave_mutate::{ChallengeOp, Config, Unlock, apply};
use vaultsave_proto::{FieldValue, PlayerRecord, record};

const TAG_LEVEL: u32 = 2;
const TAG_XP: u32 = 3;
const TAG_CURRENCY: u32 = 6;
const TAG_PLAYTHROUGHS: u32 = 7;
const TAG_SLOTS: u32 = 13;
const TAG_CHALLENGE_BLOCK: u32 = 15;
const TAG_NVHM_MISSIONS: u32 = 18;
const TAG_BLACK_MARKET_SDUS: u32 = 36;
const TAG_ITEMS: u32 = 53;
const TAG_BANK_SIZE: u32 = 56;

fn fresh_save() -> PlayerRecord {
    let mut player = PlayerRecord::new();
    player.insert(TAG_LEVEL, vec![FieldValue::Varint(5)]);
    player.insert(TAG_XP, vec![FieldValue::Varint(0)]);
    player.insert(
        TAG_CURRENCY,
        vec![FieldValue::Bytes(record::write_repeated(&[
            FieldValue::Varint(0),
            FieldValue::Varint(0),
            FieldValue::Varint(0),
            FieldValue::Varint(0),
            FieldValue::Varint(0),
        ]))],
    );
    player.insert(TAG_PLAYTHROUGHS, vec![FieldValue::Varint(0)]);
    player.insert(TAG_NVHM_MISSIONS, vec![FieldValue::Bytes(vec![9, 9, 9])]);

    let mut slots = PlayerRecord::new();
    slots.insert(1, vec![FieldValue::Varint(GAME_A.min_backpack_size as u64)]);
    slots.insert(2, vec![FieldValue::Varint(2)]);
    slots.insert(3, vec![FieldValue::Varint(2)]);
    player.insert(TAG_SLOTS, vec![FieldValue::Bytes(record::encode(&slots))]);
    player.insert(TAG_BANK_SIZE, vec![FieldValue::Varint(GAME_A.min_bank_size as u64)]);

    let log = vaultsave_challenge::ChallengeLog {
        unknown: 4,
        entries: SAMPLE_CHALLENGES
            .iter()
            .map(|info| vaultsave_challenge::ChallengeEntry {
                id: info.id as u16,
                first_one: 6,
                total_value: 10,
                second_one: 1,
                previous_value: 0,
            })
            .collect(),
    };
    player.insert(TAG_CHALLENGE_BLOCK, vec![FieldValue::Bytes(vaultsave_challenge::encode(&log, Endian::Little))]);

    player
}

fn level_of(player: &PlayerRecord) -> u64 {
    match player.get(&TAG_LEVEL).unwrap().first().unwrap() {
        FieldValue::Varint(v) => *v,
        _ => panic!("level is not a varint"),
    }
}

#[test]
fn leveling_up_keeps_xp_within_bounds() {
    let mut player = fresh_save();
    let config = Config { level: Some(30), ..Default::default() };
    apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap();
    assert_eq!(level_of(&player), 30);

    let xp = match player.get(&TAG_XP).unwrap().first().unwrap() {
        FieldValue::Varint(v) => *v,
        _ => panic!("xp is not a varint"),
    };
    let (lower, upper) = vaultsave_data::xp_bounds(30).unwrap();
    assert!(xp >= lower);
    if let Some(upper) = upper {
        assert!(xp < upper);
    }
}

#[test]
fn out_of_range_level_is_rejected_without_mutating_anything() {
    let mut player = fresh_save();
    let before = player.clone();
    let config = Config { level: Some(9999), ..Default::default() };
    let err = apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap_err();
    assert!(matches!(err, vaultsave_mutate::MutateError::InvalidLevel { .. }));
    assert_eq!(player, before);
}

#[test]
fn backpack_and_bank_requests_stay_in_sync_with_their_sdu_slots() {
    let mut player = fresh_save();
    let config = Config {
        backpack: Some(GAME_A.max_backpack_size),
        bank: Some(GAME_A.max_bank_size),
        ..Default::default()
    };
    apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap();

    let sdus = record::read_repeated(
        match player.get(&TAG_BLACK_MARKET_SDUS).unwrap().first().unwrap() {
            FieldValue::Bytes(b) => b,
            _ => panic!("sdus is not a blob"),
        },
        0,
    )
    .unwrap();
    let backpack_sdu = match sdus[GAME_A.ammo_pools.len()] {
        FieldValue::Varint(v) => v,
        _ => panic!(),
    };
    let bank_sdu = match sdus[GAME_A.ammo_pools.len() + 1] {
        FieldValue::Varint(v) => v,
        _ => panic!(),
    };
    assert_eq!(GAME_A.min_backpack_size + backpack_sdu as u32 * 3, GAME_A.max_backpack_size);
    assert_eq!(GAME_A.min_bank_size + bank_sdu as u32 * 2, GAME_A.max_bank_size);
}

#[test]
fn unlocking_uvhm_implies_tvhm() {
    let mut player = fresh_save();
    let mut unlock = HashSet::new();
    unlock.insert(Unlock::Uvhm);
    let config = Config { unlock, ..Default::default() };
    apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap();
    let playthroughs = match player.get(&TAG_PLAYTHROUGHS).unwrap().first().unwrap() {
        FieldValue::Varint(v) => *v,
        _ => panic!(),
    };
    assert_eq!(playthroughs, 2);
}

#[test]
fn copy_nvhm_missions_mirrors_into_tvhm_and_uvhm_slots() {
    let mut player = fresh_save();
    let config = Config { copy_nvhm_missions: true, ..Default::default() };
    apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap();
    let entry = player.get(&TAG_NVHM_MISSIONS).unwrap();
    assert_eq!(entry[0], entry[1]);
    assert_eq!(entry[0], entry[2]);
    let playthroughs = match player.get(&TAG_PLAYTHROUGHS).unwrap().first().unwrap() {
        FieldValue::Varint(v) => *v,
        _ => panic!(),
    };
    assert_eq!(playthroughs, 2);
}

#[test]
fn maxing_challenges_never_exceeds_the_catalog_maximum() {
    let mut player = fresh_save();
    let mut challenges = HashSet::new();
    challenges.insert(ChallengeOp::Max);
    let config = Config { challenges, ..Default::default() };
    apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap();

    let blob = match player.get(&TAG_CHALLENGE_BLOCK).unwrap().first().unwrap() {
        FieldValue::Bytes(b) => b,
        _ => panic!(),
    };
    let log = vaultsave_challenge::decode(blob, Endian::Little).unwrap();
    for entry in &log.entries {
        let info = SAMPLE_CHALLENGES.get(entry.id as u32).unwrap();
        assert!(entry.total_value <= info.max_value as u32);
    }
}

#[test]
fn applying_the_same_config_twice_is_idempotent() {
    let mut player = fresh_save();
    let mut unlock = HashSet::new();
    unlock.insert(Unlock::Slaughterdome);
    let mut challenges = HashSet::new();
    challenges.insert(ChallengeOp::Max);
    let config = Config {
        level: Some(20),
        money: Some(5000),
        maxammo: true,
        unlock,
        challenges,
        ..Default::default()
    };

    apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap();
    let once = player.clone();
    apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap();
    assert_eq!(player, once);
}

#[test]
fn renaming_and_reassigning_a_save_slot_is_isolated_from_other_fields() {
    let mut player = fresh_save();
    let before_level = level_of(&player);
    let config = Config {
        name: Some("Maya".to_string()),
        save_game_id: Some(3),
        ..Default::default()
    };
    apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap();
    assert_eq!(level_of(&player), before_level);
    assert_eq!(
        player.get(&20).unwrap().first().unwrap(),
        &FieldValue::Varint(3)
    );
}

#[test]
fn oplevel_request_bumps_playthroughs_and_adds_a_synthetic_item() {
    let mut player = fresh_save();
    let items_before = player.get(&TAG_ITEMS).map(|v| v.len()).unwrap_or(0);
    let config = Config { oplevel: Some(5), ..Default::default() };
    apply(&config, &GAME_A, &SAMPLE_CHALLENGES, Endian::Little, &mut player).unwrap();
    assert_eq!(player.get(&TAG_ITEMS).unwrap().len(), items_before + 1);
    let playthroughs = match player.get(&TAG_PLAYTHROUGHS).unwrap().first().unwrap() {
        FieldValue::Varint(v) => *v,
        _ => panic!(),
    };
    assert_eq!(playthroughs, 2);
}
