//! The mutation engine itself: [`apply`] walks a [`Config`] in the fixed
//! order the reference tool's `modify_save` establishes, since several
//! steps depend on ones that come before them (item levels must see the
//! already-updated character level; OP Level may flip on UVHM before the
//! unlock step runs; ammo unlocks must land before `maxammo` computes
//! pool caps from them).

use std::cmp::min;

use vaultsave_core::Endian;
use vaultsave_data::GameProfile;
use vaultsave_proto::{FieldValue, PlayerRecord};

use crate::config::{ChallengeOp, Config, Unlock};
use crate::error::{MutateError, Result};
use crate::fields::{
    get_bytes, get_nested, get_packed_varints, get_varint, set_bytes, set_nested, set_packed_varints, set_varint,
};

const TAG_LEVEL: u32 = 2;
const TAG_XP: u32 = 3;
const TAG_CURRENCY: u32 = 6;
const TAG_PLAYTHROUGHS: u32 = 7;
const TAG_AMMO_RESOURCES: u32 = 11;
const TAG_SLOTS: u32 = 13;
const TAG_CHALLENGE_BLOCK: u32 = 15;
const TAG_NVHM_MISSIONS: u32 = 18;
const TAG_NAME: u32 = 19;
const TAG_SAVE_GAME_ID: u32 = 20;
const TAG_SLAUGHTERDOME_UNLOCKED: u32 = 23;
const TAG_SLAUGHTERDOME_NOTIFICATIONS: u32 = 24;
const TAG_BLACK_MARKET_SDUS: u32 = 36;
const TAG_CHALLENGE_UNLOCKS: u32 = 38;
const TAG_ITEMS: u32 = 53;
const TAG_WEAPONS: u32 = 54;
const TAG_BANK_SIZE: u32 = 56;

const SLOT_BACKPACK_SIZE: usize = 1;
const SLOT_GUN_SLOTS: usize = 2;
const SLOT_EQUIPPED_GUN_SLOTS: usize = 3;

/// Index the "level" pair occupies within an unpacked item/weapon record
/// (both slots store the same value; see `vaultsave-item`'s field
/// layout).
const ITEM_LEVEL_SLOTS: (usize, usize) = (4, 5);

/// Apply every mutation `config` requests to `player`, in the fixed
/// order the reference tool uses.
pub fn apply(
    config: &Config,
    profile: &GameProfile,
    catalog: &vaultsave_data::ChallengeCatalog,
    endian: Endian,
    player: &mut PlayerRecord,
) -> Result<()> {
    apply_level(config, profile, player)?;
    apply_currency(config, player)?;
    apply_itemlevels(config, player)?;
    apply_oplevel(config, player)?;
    apply_backpack_and_bank(config, profile, player)?;
    apply_gunslots(config, player)?;
    apply_copy_nvhm_missions(config, player)?;
    apply_unlock(config, catalog, player)?;
    apply_maxammo(config, profile, player)?;
    apply_challenges(config, catalog, endian, player)?;
    apply_fix_challenge_overflow(config, catalog, endian, player)?;
    apply_name(config, player)?;
    apply_save_game_id(config, player)?;
    Ok(())
}

fn apply_level(config: &Config, profile: &GameProfile, player: &mut PlayerRecord) -> Result<()> {
    let Some(level) = config.level else { return Ok(()) };
    if level < 1 || level > profile.max_level {
        return Err(MutateError::InvalidLevel {
            level,
            max: profile.max_level,
        });
    }
    if let Some((lower, upper)) = vaultsave_data::xp_bounds(level) {
        let current_xp = get_varint(player, TAG_XP).unwrap_or(0);
        let needs_update = match upper {
            Some(upper) => current_xp < lower || current_xp >= upper,
            None => current_xp != lower,
        };
        if needs_update {
            set_varint(player, TAG_XP, lower);
        }
    }
    set_varint(player, TAG_LEVEL, level as u64);
    Ok(())
}

fn apply_currency(config: &Config, player: &mut PlayerRecord) -> Result<()> {
    let any = config.money.is_some()
        || config.eridium.is_some()
        || config.moonstone.is_some()
        || config.seraph.is_some()
        || config.torgue.is_some();
    if !any {
        return Ok(());
    }
    let mut values = get_packed_varints(player, TAG_CURRENCY).unwrap_or_default();
    let needed = values.len().max(5);
    values.resize(needed, 0);
    if let Some(v) = config.money {
        values[0] = v;
    }
    if let Some(v) = config.eridium {
        values[1] = v;
    }
    if let Some(v) = config.moonstone {
        values[1] = v;
    }
    if let Some(v) = config.seraph {
        values[2] = v;
    }
    if let Some(v) = config.torgue {
        values[4] = v;
    }
    set_packed_varints(player, TAG_CURRENCY, &values);
    Ok(())
}

fn unwrap_raw_item(raw: &[u8]) -> Result<(bool, Vec<Option<u64>>, i32)> {
    Ok(vaultsave_item::unwrap_item(raw)?)
}

fn rewrap_item(is_weapon: bool, values: &[Option<u64>], key: i32, version: u8) -> Vec<u8> {
    vaultsave_item::wrap_item(is_weapon, values, key, version)
}

fn apply_itemlevels(config: &Config, player: &mut PlayerRecord) -> Result<()> {
    let Some(requested) = config.itemlevels else { return Ok(()) };
    let level = if requested > 0 {
        requested as u64
    } else {
        get_varint(player, TAG_LEVEL).unwrap_or(1)
    };
    for tag in [TAG_ITEMS, TAG_WEAPONS] {
        let count = player.get(&tag).map(|v| v.len()).unwrap_or(0);
        for index in 0..count {
            let mut nested = get_nested(player, tag, index)?;
            let Some(raw) = get_bytes(&nested, 1) else { continue };
            let (is_weapon, mut values, key) = unwrap_raw_item(raw)?;
            let current = values.get(ITEM_LEVEL_SLOTS.0).copied().flatten().unwrap_or(0);
            if config.forceitemlevels || current > 1 {
                values[ITEM_LEVEL_SLOTS.0] = Some(level);
                values[ITEM_LEVEL_SLOTS.1] = Some(level);
                // The struct version byte lives in `raw[0]`'s low 7 bits;
                // reuse it untouched rather than re-deriving from a
                // profile the item codec doesn't otherwise need here.
                let version_byte = raw[0] & 0x7F;
                let rewrapped = rewrap_item(is_weapon, &values, key, version_byte);
                set_bytes(&mut nested, 1, rewrapped);
                set_nested(player, tag, index, &nested);
            }
        }
    }
    Ok(())
}

fn apply_oplevel(config: &Config, player: &mut PlayerRecord) -> Result<()> {
    let Some(oplevel) = config.oplevel else { return Ok(()) };
    let oplevel = oplevel.min(0x7FFFFF) as i64;
    let new_field_data = (-(4i64 | (oplevel << 8))) as u64;

    let mut set = false;
    let count = player.get(&TAG_ITEMS).map(|v| v.len()).unwrap_or(0);
    for index in 0..count {
        let mut nested = get_nested(player, TAG_ITEMS, index)?;
        let Some(marker) = get_varint(&nested, 2) else { continue };
        let Some(raw) = get_bytes(&nested, 1) else { continue };
        let (_, values, _) = unwrap_raw_item(raw)?;
        let is_synthetic = values.first().copied().flatten() == Some(255)
            && values.iter().skip(1).all(|v| v.unwrap_or(0) == 0);
        if is_synthetic {
            let idnum = ((marker as i64).wrapping_neg()) & 0xFF;
            if idnum == 4 {
                set_varint(&mut nested, 2, new_field_data);
                set_nested(player, TAG_ITEMS, index, &nested);
                set = true;
                break;
            }
        }
    }

    if !set {
        let base_data: [u8; 40] = [
            0x07, 0x00, 0x00, 0x00, 0x00, 0x39, 0x2a, 0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];
        let mut entry = PlayerRecord::new();
        entry.insert(1, vec![FieldValue::Bytes(base_data.to_vec())]);
        entry.insert(2, vec![FieldValue::Varint(new_field_data)]);
        entry.insert(3, vec![FieldValue::Varint(0)]);
        entry.insert(4, vec![FieldValue::Varint(0)]);
        let blob = vaultsave_proto::record::encode(&entry);
        player.entry(TAG_ITEMS).or_default().push(FieldValue::Bytes(blob));
    }

    // Mirrors the reference tool triggering an implicit UVHM unlock when
    // an OP Level is requested; `config.unlock` isn't mutated here since
    // it's borrowed, so the playthrough field is bumped directly.
    if oplevel > 0 && get_varint(player, TAG_PLAYTHROUGHS).unwrap_or(0) < 2 {
        set_varint(player, TAG_PLAYTHROUGHS, 2);
    }
    Ok(())
}

fn apply_backpack_and_bank(config: &Config, profile: &GameProfile, player: &mut PlayerRecord) -> Result<()> {
    if let Some(size) = config.backpack {
        let sdu_size = ((size.saturating_sub(profile.min_backpack_size)) as f64 / 3.0).ceil() as u32;
        let new_size = profile.min_backpack_size + sdu_size * 3;

        let mut slots = get_nested(player, TAG_SLOTS, 0).unwrap_or_default();
        set_varint(&mut slots, SLOT_BACKPACK_SIZE as u32, new_size as u64);
        set_nested(player, TAG_SLOTS, 0, &slots);

        let mut sdus = get_packed_varints(player, TAG_BLACK_MARKET_SDUS).unwrap_or_default();
        let backpack_index = profile.ammo_pools.len();
        if sdus.len() <= backpack_index {
            sdus.resize(backpack_index + 1, 0);
        }
        sdus[backpack_index] = sdu_size as u64;
        set_packed_varints(player, TAG_BLACK_MARKET_SDUS, &sdus);
    }

    if let Some(size) = config.bank {
        let sdu_size = min(
            255,
            ((size.saturating_sub(profile.min_bank_size)) as f64 / 2.0).ceil() as u32,
        );
        let new_size = profile.min_bank_size + sdu_size * 2;
        set_varint(player, TAG_BANK_SIZE, new_size as u64);

        let mut sdus = get_packed_varints(player, TAG_BLACK_MARKET_SDUS).unwrap_or_default();
        let bank_index = profile.ammo_pools.len() + 1;
        if sdus.len() <= bank_index {
            sdus.resize(bank_index + 1, 0);
        }
        sdus[bank_index] = sdu_size as u64;
        set_packed_varints(player, TAG_BLACK_MARKET_SDUS, &sdus);
    }
    Ok(())
}

fn apply_gunslots(config: &Config, player: &mut PlayerRecord) -> Result<()> {
    let Some(n) = config.gunslots else { return Ok(()) };
    let mut slots = get_nested(player, TAG_SLOTS, 0).unwrap_or_default();
    set_varint(&mut slots, SLOT_GUN_SLOTS as u32, n as u64);
    let equipped = get_varint(&slots, SLOT_EQUIPPED_GUN_SLOTS as u32).unwrap_or(0);
    if n >= 2 && equipped > (n - 2) as u64 {
        set_varint(&mut slots, SLOT_EQUIPPED_GUN_SLOTS as u32, (n - 2) as u64);
    }
    set_nested(player, TAG_SLOTS, 0, &slots);
    Ok(())
}

fn apply_copy_nvhm_missions(config: &Config, player: &mut PlayerRecord) -> Result<()> {
    if !config.copy_nvhm_missions {
        return Ok(());
    }
    let nvhm = player
        .get(&TAG_NVHM_MISSIONS)
        .and_then(|v| v.first())
        .cloned()
        .ok_or(MutateError::MissingField { tag: TAG_NVHM_MISSIONS })?;
    let entry = player.entry(TAG_NVHM_MISSIONS).or_default();
    if entry.len() < 3 {
        entry.resize(3, nvhm.clone());
    }
    entry[1] = nvhm.clone();
    entry[2] = nvhm;

    if get_varint(player, TAG_PLAYTHROUGHS).unwrap_or(0) < 2 {
        set_varint(player, TAG_PLAYTHROUGHS, 2);
    }
    Ok(())
}

fn apply_unlock(config: &Config, catalog: &vaultsave_data::ChallengeCatalog, player: &mut PlayerRecord) -> Result<()> {
    if config.unlock.is_empty() {
        return Ok(());
    }

    if config.unlock.contains(&Unlock::Slaughterdome) {
        let mut unlocked = get_bytes(player, TAG_SLAUGHTERDOME_UNLOCKED).unwrap_or(&[]).to_vec();
        let mut notifications = get_bytes(player, TAG_SLAUGHTERDOME_NOTIFICATIONS).unwrap_or(&[]).to_vec();
        if !unlocked.contains(&1) {
            unlocked.push(1);
        }
        if !notifications.contains(&1) {
            notifications.push(1);
        }
        set_bytes(player, TAG_SLAUGHTERDOME_UNLOCKED, unlocked);
        set_bytes(player, TAG_SLAUGHTERDOME_NOTIFICATIONS, notifications);
    }

    if config.unlock.contains(&Unlock::Uvhm) {
        if get_varint(player, TAG_PLAYTHROUGHS).unwrap_or(0) < 2 {
            set_varint(player, TAG_PLAYTHROUGHS, 2);
        }
    } else if config.unlock.contains(&Unlock::Tvhm) && get_varint(player, TAG_PLAYTHROUGHS).unwrap_or(0) < 1 {
        set_varint(player, TAG_PLAYTHROUGHS, 1);
    }

    if config.unlock.contains(&Unlock::Challenges) {
        // The reference tool keys this off each challenge's DLC id and
        // text name, sourced from a full catalog this crate's
        // `ChallengeCatalog` doesn't carry (see `DESIGN.md`); we key off
        // the numeric id instead, which is all our catalog models.
        let mut seen = std::collections::HashSet::new();
        let count = player.get(&TAG_CHALLENGE_UNLOCKS).map(|v| v.len()).unwrap_or(0);
        for index in 0..count {
            let nested = get_nested(player, TAG_CHALLENGE_UNLOCKS, index)?;
            if let Some(id) = get_varint(&nested, 1) {
                seen.insert(id);
            }
        }
        for info in catalog.iter() {
            let id = info.id as u64;
            if seen.contains(&id) {
                continue;
            }
            let mut entry = PlayerRecord::new();
            entry.insert(1, vec![FieldValue::Varint(id)]);
            entry.insert(3, vec![FieldValue::Bytes(info.name.as_bytes().to_vec())]);
            let blob = vaultsave_proto::record::encode(&entry);
            player.entry(TAG_CHALLENGE_UNLOCKS).or_default().push(FieldValue::Bytes(blob));
        }
    }

    // `Unlock::Ammo` (setting every black-market ammo SDU to its max
    // level) is handled in `apply_maxammo`, which always runs afterward
    // and needs the resulting SDU levels to compute ammo pool caps.

    Ok(())
}

fn apply_maxammo(config: &Config, profile: &GameProfile, player: &mut PlayerRecord) -> Result<()> {
    let wants_ammo_unlock = config.unlock.contains(&Unlock::Ammo);
    if !wants_ammo_unlock && !config.maxammo {
        return Ok(());
    }

    let mut sdus = get_packed_varints(player, TAG_BLACK_MARKET_SDUS).unwrap_or_default();
    if sdus.len() < profile.ammo_pools.len() {
        sdus.resize(profile.ammo_pools.len(), 0);
    }
    if wants_ammo_unlock {
        for idx in 0..profile.ammo_pools.len() {
            sdus[idx] = 7;
        }
        set_packed_varints(player, TAG_BLACK_MARKET_SDUS, &sdus);
    }

    if !config.maxammo {
        return Ok(());
    }

    let mut max_ammo = vec![(0u32, 0u32); profile.ammo_pools.len()];
    for (idx, pool) in profile.ammo_pools.iter().enumerate() {
        let bm_level = sdus.get(idx).copied().unwrap_or(0) as usize;
        let capped = bm_level.min(pool.levels.len() - 1);
        max_ammo[idx] = (capped as u32, pool.levels[capped]);
    }

    let mut seen = vec![false; profile.ammo_pools.len()];
    let count = player.get(&TAG_AMMO_RESOURCES).map(|v| v.len()).unwrap_or(0);
    for index in 0..count {
        let mut nested = get_nested(player, TAG_AMMO_RESOURCES, index)?;
        let Some(resource) = get_bytes(&nested, 1).map(|b| b.to_vec()) else { continue };
        let Some(pool_idx) = profile
            .ammo_pools
            .iter()
            .position(|pool| pool.name.as_bytes() == resource.as_slice())
        else {
            continue;
        };
        seen[pool_idx] = true;
        let (level, amount) = max_ammo[pool_idx];
        set_varint(&mut nested, 3, level as u64);
        nested.insert(4, vec![FieldValue::Fixed32((amount as f32).to_bits())]);
        set_nested(player, TAG_AMMO_RESOURCES, index, &nested);
    }

    for (idx, pool) in profile.ammo_pools.iter().enumerate() {
        if seen[idx] {
            continue;
        }
        let (level, amount) = max_ammo[idx];
        let mut entry = PlayerRecord::new();
        entry.insert(1, vec![FieldValue::Bytes(pool.name.as_bytes().to_vec())]);
        entry.insert(2, vec![FieldValue::Bytes(pool.name.as_bytes().to_vec())]);
        entry.insert(3, vec![FieldValue::Varint(level as u64)]);
        entry.insert(4, vec![FieldValue::Fixed32((amount as f32).to_bits())]);
        let blob = vaultsave_proto::record::encode(&entry);
        player.entry(TAG_AMMO_RESOURCES).or_default().push(FieldValue::Bytes(blob));
    }

    Ok(())
}

fn decode_challenges(endian: Endian, player: &PlayerRecord) -> Result<vaultsave_challenge::ChallengeLog> {
    let blob = get_bytes(player, TAG_CHALLENGE_BLOCK).ok_or(MutateError::MissingField { tag: TAG_CHALLENGE_BLOCK })?;
    Ok(vaultsave_challenge::decode(blob, endian)?)
}

fn encode_challenges(endian: Endian, player: &mut PlayerRecord, log: &vaultsave_challenge::ChallengeLog) {
    let blob = vaultsave_challenge::encode(log, endian);
    set_bytes(player, TAG_CHALLENGE_BLOCK, blob);
}

fn apply_challenges(
    config: &Config,
    catalog: &vaultsave_data::ChallengeCatalog,
    endian: Endian,
    player: &mut PlayerRecord,
) -> Result<()> {
    if config.challenges.is_empty() {
        return Ok(());
    }
    let mut log = decode_challenges(endian, player)?;
    let do_zero = config.challenges.contains(&ChallengeOp::Zero);
    let do_max = config.challenges.contains(&ChallengeOp::Max);
    let do_bonus = config.challenges.contains(&ChallengeOp::Bonus);

    for entry in &mut log.entries {
        let Some(info) = catalog.get(entry.id as u32) else {
            continue;
        };
        if do_zero {
            entry.total_value = entry.previous_value;
        }
        if do_max {
            entry.total_value = entry.previous_value.saturating_add(info.max_value.max(0) as u32);
        }
        if do_bonus && info.bonus != 0 {
            let bonus_value = entry.previous_value.saturating_add(info.bonus.max(0) as u32);
            if do_max || do_zero || entry.total_value < bonus_value {
                entry.total_value = bonus_value;
            }
        }
    }

    encode_challenges(endian, player, &log);
    Ok(())
}

fn apply_fix_challenge_overflow(
    config: &Config,
    catalog: &vaultsave_data::ChallengeCatalog,
    endian: Endian,
    player: &mut PlayerRecord,
) -> Result<()> {
    if !config.fix_challenge_overflow {
        return Ok(());
    }
    let mut log = decode_challenges(endian, player)?;
    for entry in &mut log.entries {
        let Some(info) = catalog.get(entry.id as u32) else {
            continue;
        };
        if entry.total_value >= 2_000_000_000 {
            entry.total_value = info.max_value.max(0) as u32 + 1;
        }
    }
    encode_challenges(endian, player, &log);
    Ok(())
}

fn apply_name(config: &Config, player: &mut PlayerRecord) -> Result<()> {
    let Some(name) = &config.name else { return Ok(()) };
    if name.is_empty() {
        return Ok(());
    }
    let mut nested = get_nested(player, TAG_NAME, 0).unwrap_or_default();
    set_bytes(&mut nested, 1, name.as_bytes().to_vec());
    set_nested(player, TAG_NAME, 0, &nested);
    Ok(())
}

fn apply_save_game_id(config: &Config, player: &mut PlayerRecord) -> Result<()> {
    let Some(id) = config.save_game_id else { return Ok(()) };
    if id == 0 {
        return Ok(());
    }
    set_varint(player, TAG_SAVE_GAME_ID, id as u64);
    Ok(())
}
