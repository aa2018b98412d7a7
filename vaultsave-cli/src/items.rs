//! Wires the item-code listing format to the two player-record tags
//! that actually hold items.
//!
//! The inventory and weapon containers are each a repeated nested
//! record at a fixed tag, itself shaped `{1: wrapped bytes, 2: marker
//! varint, 3: varint, 4: varint}` (see `vaultsave-mutate::apply`, which
//! this mirrors). No separate field tag for the bank's own storage
//! surfaced from the source material available to this crate; bank
//! entries are folded into the inventory container on import, and
//! export never populates the bank section. See `DESIGN.md`.

use vaultsave_proto::{FieldValue, PlayerRecord};
use vaultsave_itemcodes::{ItemCodeFile, import_item};

use crate::error::Result;

const TAG_ITEMS: u32 = 53;
const TAG_WEAPONS: u32 = 54;

fn wrap_entry(wrapped: Vec<u8>) -> Vec<u8> {
    let mut entry = PlayerRecord::new();
    entry.insert(1, vec![FieldValue::Bytes(wrapped)]);
    entry.insert(2, vec![FieldValue::Varint(0)]);
    entry.insert(3, vec![FieldValue::Varint(0)]);
    entry.insert(4, vec![FieldValue::Varint(0)]);
    vaultsave_proto::record::encode(&entry)
}

fn extract_wrapped(tag_blob: &[u8]) -> Result<Option<Vec<u8>>> {
    let nested = vaultsave_proto::record::decode(tag_blob)?;
    let Some(FieldValue::Bytes(raw)) = nested.get(&1).and_then(|v| v.first()) else {
        return Ok(None);
    };
    Ok(Some(raw.clone()))
}

/// Collect every non-synthetic item/weapon in `player` into an
/// [`ItemCodeFile`], ready for [`vaultsave_itemcodes::format_item_code_file`].
pub fn export_items(player: &PlayerRecord) -> Result<ItemCodeFile> {
    let mut file = ItemCodeFile::default();

    for (tag, target) in [(TAG_ITEMS, &mut file.items), (TAG_WEAPONS, &mut file.weapons)] {
        let Some(values) = player.get(&tag) else { continue };
        for value in values {
            let FieldValue::Bytes(blob) = value else { continue };
            let Some(wrapped) = extract_wrapped(blob)? else { continue };
            if vaultsave_itemcodes::is_synthetic(&wrapped)? {
                continue;
            }
            target.push(wrapped);
        }
    }

    Ok(file)
}

/// Replace `player`'s inventory and weapon containers with the contents
/// of `file`, re-keying every item as it's imported.
pub fn import_items(player: &mut PlayerRecord, file: &ItemCodeFile, rng: &mut impl rand::Rng) -> Result<()> {
    let mut items = Vec::new();
    for wrapped in file.bank.iter().chain(&file.items) {
        let rekeyed = import_item(wrapped, rng)?;
        items.push(FieldValue::Bytes(wrap_entry(rekeyed)));
    }
    if !items.is_empty() {
        player.insert(TAG_ITEMS, items);
    }

    let mut weapons = Vec::new();
    for wrapped in &file.weapons {
        let rekeyed = import_item(wrapped, rng)?;
        weapons.push(FieldValue::Bytes(wrap_entry(rekeyed)));
    }
    if !weapons.is_empty() {
        player.insert(TAG_WEAPONS, weapons);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vaultsave_data::GAME_A;

    fn sample_wrapped(level: u64) -> Vec<u8> {
        let mut values = vec![Some(1u64); 17];
        values[4] = Some(level);
        vaultsave_item::wrap_item(false, &values, 7, GAME_A.item_struct_version)
    }

    #[test]
    fn import_then_export_round_trips_the_item_set() {
        let mut file = ItemCodeFile::default();
        file.items.push(sample_wrapped(5));
        file.weapons.push(sample_wrapped(10));

        let mut player = PlayerRecord::new();
        let mut rng = rand::rng();
        import_items(&mut player, &file, &mut rng).unwrap();

        let exported = export_items(&player).unwrap();
        assert_eq!(exported.items.len(), 1);
        assert_eq!(exported.weapons.len(), 1);

        let (_, values, _) = vaultsave_item::unwrap_item(&exported.items[0]).unwrap();
        assert_eq!(values[4], Some(5));
    }

    #[test]
    fn synthetic_items_are_never_exported() {
        let mut values = vec![Some(0u64); 17];
        values[0] = Some(255);
        let synthetic = vaultsave_item::wrap_item(false, &values, 0, GAME_A.item_struct_version);

        let mut player = PlayerRecord::new();
        player.insert(TAG_ITEMS, vec![FieldValue::Bytes(wrap_entry(synthetic))]);

        let exported = export_items(&player).unwrap();
        assert!(exported.items.is_empty());
    }

    #[test]
    fn bank_entries_fold_into_the_inventory_container_on_import() {
        let mut file = ItemCodeFile::default();
        file.bank.push(sample_wrapped(3));

        let mut player = PlayerRecord::new();
        let mut rng = rand::rng();
        import_items(&mut player, &file, &mut rng).unwrap();

        assert_eq!(player.get(&TAG_ITEMS).map(|v| v.len()), Some(1));
    }
}
