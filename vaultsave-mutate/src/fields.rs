//! Small accessors over [`PlayerRecord`] tags, used in place of a full
//! schema wherever `modify_save` touches a tag directly rather than
//! through a named structured field.

use vaultsave_proto::{FieldValue, PlayerRecord};

use crate::error::{MutateError, Result};

/// Read the first value stored at `tag` as a varint, if present.
pub fn get_varint(record: &PlayerRecord, tag: u32) -> Option<u64> {
    match record.get(&tag)?.first()? {
        FieldValue::Varint(v) => Some(*v),
        _ => None,
    }
}

/// Replace `tag` with a single varint value.
pub fn set_varint(record: &mut PlayerRecord, tag: u32, value: u64) {
    record.insert(tag, vec![FieldValue::Varint(value)]);
}

/// Read the first value stored at `tag` as a bytes blob, if present.
pub fn get_bytes<'a>(record: &'a PlayerRecord, tag: u32) -> Option<&'a [u8]> {
    match record.get(&tag)?.first()? {
        FieldValue::Bytes(b) => Some(b),
        _ => None,
    }
}

/// Replace `tag` with a single bytes value.
pub fn set_bytes(record: &mut PlayerRecord, tag: u32, value: Vec<u8>) {
    record.insert(tag, vec![FieldValue::Bytes(value)]);
}

/// Read a packed-repeated varint blob stored at `tag`'s first value.
pub fn get_packed_varints(record: &PlayerRecord, tag: u32) -> Result<Vec<u64>> {
    let blob = get_bytes(record, tag).ok_or(MutateError::MissingField { tag })?;
    let values = vaultsave_proto::record::read_repeated(blob, 0)?;
    values
        .into_iter()
        .map(|v| match v {
            FieldValue::Varint(n) => Ok(n),
            _ => Err(MutateError::MalformedField {
                tag,
                reason: "expected a packed-repeated varint blob".into(),
            }),
        })
        .collect()
}

/// Inverse of [`get_packed_varints`].
pub fn set_packed_varints(record: &mut PlayerRecord, tag: u32, values: &[u64]) {
    let packed: Vec<FieldValue> = values.iter().map(|&v| FieldValue::Varint(v)).collect();
    let blob = vaultsave_proto::record::write_repeated(&packed);
    set_bytes(record, tag, blob);
}

/// Decode a nested field-record stored as a bytes blob at `tag`'s
/// `index`'th entry.
pub fn get_nested(record: &PlayerRecord, tag: u32, index: usize) -> Result<PlayerRecord> {
    let values = record.get(&tag).ok_or(MutateError::MissingField { tag })?;
    let FieldValue::Bytes(blob) = values.get(index).ok_or(MutateError::MissingField { tag })? else {
        return Err(MutateError::MalformedField {
            tag,
            reason: "expected a nested record".into(),
        });
    };
    Ok(vaultsave_proto::record::decode(blob)?)
}

/// Re-encode a nested field-record back into `tag`'s `index`'th entry.
pub fn set_nested(record: &mut PlayerRecord, tag: u32, index: usize, nested: &PlayerRecord) {
    let blob = vaultsave_proto::record::encode(nested);
    let entry = record.entry(tag).or_default();
    if index < entry.len() {
        entry[index] = FieldValue::Bytes(blob);
    } else {
        entry.resize(index + 1, FieldValue::Bytes(Vec::new()));
        entry[index] = FieldValue::Bytes(blob);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_round_trips() {
        let mut record = PlayerRecord::new();
        assert_eq!(get_varint(&record, 1), None);
        set_varint(&mut record, 1, 42);
        assert_eq!(get_varint(&record, 1), Some(42));
    }

    #[test]
    fn bytes_round_trip() {
        let mut record = PlayerRecord::new();
        set_bytes(&mut record, 2, vec![1, 2, 3]);
        assert_eq!(get_bytes(&record, 2), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn packed_varints_round_trip() {
        let mut record = PlayerRecord::new();
        set_packed_varints(&mut record, 3, &[10, 20, 30]);
        assert_eq!(get_packed_varints(&record, 3).unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn packed_varints_missing_is_error() {
        let record = PlayerRecord::new();
        assert!(get_packed_varints(&record, 3).is_err());
    }

    #[test]
    fn nested_round_trips_and_grows_the_entry_vec() {
        let mut record = PlayerRecord::new();
        let mut nested = PlayerRecord::new();
        set_varint(&mut nested, 1, 7);
        set_nested(&mut record, 4, 2, &nested);
        assert_eq!(record.get(&4).map(|v| v.len()), Some(3));
        let decoded = get_nested(&record, 4, 2).unwrap();
        assert_eq!(get_varint(&decoded, 1), Some(7));
    }
}
