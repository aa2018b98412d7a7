//! Integration tests for the item codec across both games' field layouts.

use vaultsave_data::{ITEM_FIELD_BITS, WEAPON_FIELD_BITS};
use vaultsave_item::{pack_item_values, unpack_item_values, unwrap_item, verify_checksum, wrap_item};

fn sizes_for(is_weapon: bool) -> Vec<u8> {
    let table = if is_weapon { &WEAPON_FIELD_BITS } else { &ITEM_FIELD_BITS };
    table.iter().map(|(_, bits)| *bits).collect()
}

#[test]
fn item_and_weapon_records_survive_many_keys() {
    for is_weapon in [false, true] {
        let sizes = sizes_for(is_weapon);
        let values: Vec<Option<u64>> = sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| Some(((i as u64 * 97) + 3) & ((1u64 << size) - 1)))
            .collect();

        for key in [0i32, 1, -1, 31, 32, 1_000_000, -1_000_000, i32::MAX, i32::MIN] {
            let wrapped = wrap_item(is_weapon, &values, key, 7);
            let (recovered_is_weapon, recovered_values, recovered_key) =
                unwrap_item(&wrapped).unwrap();
            assert_eq!(recovered_is_weapon, is_weapon);
            assert_eq!(recovered_key, key);
            assert_eq!(recovered_values, values);
            assert!(verify_checksum(&wrapped).is_ok());
        }
    }
}

#[test]
fn partial_records_round_trip_with_trailing_none_fields() {
    let sizes = sizes_for(false);
    let mut values: Vec<Option<u64>> = vec![Some(7), Some(42), Some(900_000)];
    values.resize(sizes.len(), None);

    let wrapped = wrap_item(false, &values, 55, 7);
    let (_, recovered, _) = unwrap_item(&wrapped).unwrap();
    assert_eq!(recovered, values);
}

#[test]
fn pack_unpack_agrees_with_wrap_unwrap_for_bare_records() {
    let sizes = sizes_for(true);
    let values: Vec<Option<u64>> = sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| Some((i as u64) & ((1u64 << size) - 1)))
        .collect();

    let packed = pack_item_values(&sizes, &values);
    let unpacked = unpack_item_values(&sizes, &packed);
    assert_eq!(unpacked, values);
}

#[test]
fn tampering_with_any_byte_is_detected_by_checksum_verification() {
    let sizes = sizes_for(false);
    let values: Vec<Option<u64>> = sizes
        .iter()
        .enumerate()
        .map(|(i, &size)| Some(((i as u64 * 13) + 1) & ((1u64 << size) - 1)))
        .collect();
    let wrapped = wrap_item(false, &values, 9999, 7);

    let mut mismatches = 0;
    for idx in 5..wrapped.len() {
        let mut tampered = wrapped.clone();
        tampered[idx] ^= 0x01;
        if verify_checksum(&tampered).is_err() {
            mismatches += 1;
        }
    }
    assert!(mismatches > 0, "expected at least one single-bit flip to be caught");
}
