//! Header framing, checksum, and obfuscation around a packed item
//! record: the layer that turns [`crate::pack_item_values`] output into
//! the bytes actually stored in a save file.

use vaultsave_core::Crc32;
use vaultsave_data::{GAME_A, GAME_B, WEAPON_FIELD_BITS, ITEM_FIELD_BITS};

use crate::error::{ItemError, Result};
use crate::obfuscate::{rotate_left, rotate_right, xor_stream};
use crate::pack::{pack_item_values, unpack_item_values};

/// Bit widths for an item's (non-weapon) or weapon's field layout.
fn field_sizes(is_weapon: bool) -> [u8; 17] {
    let table = if is_weapon { &WEAPON_FIELD_BITS } else { &ITEM_FIELD_BITS };
    let mut sizes = [0u8; 17];
    for (i, (_, bits)) in table.iter().enumerate() {
        sizes[i] = *bits;
    }
    sizes
}

fn key_rotation_steps(key: i32) -> usize {
    (key & 31) as usize
}

fn key_xor_seed(key: i32) -> u32 {
    ((key >> 5) as i32) as u32
}

/// Checksum + header framing shared by [`wrap_item`] and
/// [`verify_checksum`]: CRC-32 over `header ++ 0xFFFF ++ item ++
/// padding`, folded to 16 bits.
fn compute_checksum(header: &[u8; 5], item: &[u8]) -> u16 {
    let padding_len = 33usize.saturating_sub(item.len());
    let mut buf = Vec::with_capacity(5 + 2 + item.len() + padding_len);
    buf.extend_from_slice(header);
    buf.extend_from_slice(&[0xFF, 0xFF]);
    buf.extend_from_slice(item);
    buf.extend(std::iter::repeat(0xFFu8).take(padding_len));
    let h = Crc32::compute(&buf);
    (((h >> 16) ^ h) & 0xFFFF) as u16
}

/// Pack and obfuscate an item/weapon record into the bytes stored in a
/// save file.
///
/// `values` is in field order (see [`vaultsave_data::ITEM_FIELD_BITS`] /
/// [`vaultsave_data::WEAPON_FIELD_BITS`]); `key` is the save-specific
/// obfuscation key associated with this item.
pub fn wrap_item(is_weapon: bool, values: &[Option<u64>], key: i32, item_struct_version: u8) -> Vec<u8> {
    let sizes = field_sizes(is_weapon);
    let item = pack_item_values(&sizes, values);

    let mut header = [0u8; 5];
    header[0] = ((is_weapon as u8) << 7) | item_struct_version;
    header[1..5].copy_from_slice(&key.to_be_bytes());

    let checksum = compute_checksum(&header, &item);

    let mut plain = Vec::with_capacity(2 + item.len());
    plain.extend_from_slice(&checksum.to_be_bytes());
    plain.extend_from_slice(&item);

    let rotated = rotate_left(&plain, key_rotation_steps(key));
    let body = xor_stream(&rotated, key_xor_seed(key));

    let mut out = Vec::with_capacity(5 + body.len());
    out.extend_from_slice(&header);
    out.extend_from_slice(&body);
    out
}

/// Header bits, key, and checksum-verified payload shared by
/// [`unwrap_item`] and [`verify_checksum`], so the CRC-16 check only
/// has to rotate/XOR the blob once.
fn decode_and_verify(data: &[u8]) -> Result<(bool, i32, Vec<u8>)> {
    if data.len() < 5 {
        return Err(ItemError::TooShort { len: data.len() });
    }
    let is_weapon = (data[0] >> 7) != 0;
    let item_struct_version = data[0] & 0x7F;
    if item_struct_version != GAME_A.item_struct_version && item_struct_version != GAME_B.item_struct_version {
        return Err(ItemError::UnknownItemStructVersion { version: item_struct_version });
    }
    let key = i32::from_be_bytes([data[1], data[2], data[3], data[4]]);

    let xored = xor_stream(&data[5..], key_xor_seed(key));
    let raw = rotate_right(&xored, key_rotation_steps(key));
    if raw.len() < 2 {
        return Err(ItemError::TooShort { len: data.len() });
    }
    let stored = u16::from_be_bytes([raw[0], raw[1]]);
    let item = raw[2..].to_vec();

    let mut header = [0u8; 5];
    header.copy_from_slice(&data[..5]);
    let computed = compute_checksum(&header, &item);
    if computed != stored {
        return Err(ItemError::checksum_mismatch(stored, computed));
    }

    Ok((is_weapon, key, item))
}

/// Recover `(is_weapon, field values, key)` from a wrapped item blob.
///
/// A tampered checksum or an item struct version outside the known set
/// (7 for Game A, 10 for Game B) is a hard error, not a silent
/// pass-through; use [`verify_checksum`] when only the integrity check
/// is wanted.
pub fn unwrap_item(data: &[u8]) -> Result<(bool, Vec<Option<u64>>, i32)> {
    let (is_weapon, key, item) = decode_and_verify(data)?;
    let sizes = field_sizes(is_weapon);
    let values = unpack_item_values(&sizes, &item);
    Ok((is_weapon, values, key))
}

/// Re-key a wrapped item in place: unwraps the 2-byte-checksum-prefixed
/// payload with the *old* key embedded in `data`, then re-wraps the same
/// payload under `new_key`. Leaves the field values untouched; only the
/// obfuscation key (and therefore the stored checksum and byte layout)
/// changes. Used when importing an item code into a save that has its
/// own key namespace.
pub fn replace_key(data: &[u8], new_key: i32) -> Result<Vec<u8>> {
    if data.len() < 5 {
        return Err(ItemError::TooShort { len: data.len() });
    }
    let old_key = i32::from_be_bytes([data[1], data[2], data[3], data[4]]);
    let xored = xor_stream(&data[5..], key_xor_seed(old_key));
    let rotated = rotate_right(&xored, key_rotation_steps(old_key));
    let item = rotated.get(2..).unwrap_or(&[]);

    let mut header = [0u8; 5];
    header[0] = data[0];
    header[1..5].copy_from_slice(&new_key.to_be_bytes());

    let checksum = compute_checksum(&header, item);
    let mut plain = Vec::with_capacity(2 + item.len());
    plain.extend_from_slice(&checksum.to_be_bytes());
    plain.extend_from_slice(item);

    let body = xor_stream(&rotate_left(&plain, key_rotation_steps(new_key)), key_xor_seed(new_key));
    let mut out = Vec::with_capacity(5 + body.len());
    out.extend_from_slice(&header);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Verify that a wrapped item's stored checksum matches the CRC-32
/// recomputed over its header and decoded payload, and that its item
/// struct version is one of the known values. [`unwrap_item`] already
/// performs this check internally; use this directly when only the
/// integrity check is wanted, without unpacking field values.
pub fn verify_checksum(data: &[u8]) -> Result<()> {
    decode_and_verify(data).map(|_| ())
}
