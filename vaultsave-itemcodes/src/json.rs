//! JSON interchange for a whole player record.
//!
//! Two flavors are supported, both keyed by field tag (as a JSON object
//! with string keys, since JSON has no integer-keyed map):
//!
//! - `decodedjson`: the raw tagged tree. Every value remembers its wire
//!   type so the record round-trips exactly; `Bytes` fields are written
//!   out as arrays of byte values.
//! - `json`: the same tree, except `Bytes` fields are rendered as
//!   Latin-1-cast strings instead of numeric arrays, which is far more
//!   readable for the text-heavy fields (names, item wrapper blobs)
//!   these records tend to carry.
//!
//! Re-import dispatches between the two by inspecting which flavor of
//! `Bytes` representation the first blob it finds actually uses.

use serde_json::{Map, Value, json};

use crate::error::{ItemCodesError, Result};
use vaultsave_proto::{FieldValue, PlayerRecord};

fn bytes_to_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

fn latin1_to_bytes(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            u32::from(c)
                .try_into()
                .map_err(|_| ItemCodesError::MalformedJson(format!("non-Latin-1 character {c:?} in byte string")))
        })
        .collect()
}

fn field_to_json(value: &FieldValue, latin1_bytes: bool) -> Value {
    match value {
        FieldValue::Varint(v) => json!({ "varint": v }),
        FieldValue::Fixed32(v) => json!({ "fixed32": v }),
        FieldValue::Fixed64(v) => json!({ "fixed64": v }),
        FieldValue::Bytes(b) => {
            if latin1_bytes {
                json!({ "text": bytes_to_latin1(b) })
            } else {
                json!({ "bytes": b.clone() })
            }
        }
    }
}

fn json_to_field(value: &Value) -> Result<FieldValue> {
    let obj = value
        .as_object()
        .ok_or_else(|| ItemCodesError::MalformedJson("expected a field-value object".into()))?;

    let bad = || ItemCodesError::MalformedJson(format!("malformed field value: {value}"));

    if let Some(v) = obj.get("varint") {
        return Ok(FieldValue::Varint(v.as_u64().ok_or_else(bad)?));
    }
    if let Some(v) = obj.get("fixed32") {
        return Ok(FieldValue::Fixed32(v.as_u64().ok_or_else(bad)?.try_into().map_err(|_| bad())?));
    }
    if let Some(v) = obj.get("fixed64") {
        return Ok(FieldValue::Fixed64(v.as_u64().ok_or_else(bad)?));
    }
    if let Some(v) = obj.get("bytes") {
        let arr = v.as_array().ok_or_else(bad)?;
        let bytes = arr
            .iter()
            .map(|b| b.as_u64().and_then(|n| u8::try_from(n).ok()).ok_or_else(bad))
            .collect::<Result<Vec<u8>>>()?;
        return Ok(FieldValue::Bytes(bytes));
    }
    if let Some(v) = obj.get("text") {
        let text = v.as_str().ok_or_else(bad)?;
        return Ok(FieldValue::Bytes(latin1_to_bytes(text)?));
    }

    Err(bad())
}

fn record_to_json(player: &PlayerRecord, latin1_bytes: bool) -> Value {
    let mut tags = Map::new();
    for (tag, values) in player {
        let list: Vec<Value> = values.iter().map(|v| field_to_json(v, latin1_bytes)).collect();
        tags.insert(tag.to_string(), Value::Array(list));
    }
    Value::Object(tags)
}

fn json_to_record(value: &Value) -> Result<PlayerRecord> {
    let obj = value
        .as_object()
        .ok_or_else(|| ItemCodesError::MalformedJson("expected a tag-keyed object at the top level".into()))?;

    let mut record = PlayerRecord::new();
    for (tag_str, values) in obj {
        let tag: u32 = tag_str
            .parse()
            .map_err(|_| ItemCodesError::MalformedJson(format!("field tag {tag_str:?} is not a number")))?;
        let values = values
            .as_array()
            .ok_or_else(|| ItemCodesError::MalformedJson(format!("tag {tag} did not map to an array")))?;
        let decoded = values.iter().map(json_to_field).collect::<Result<Vec<_>>>()?;
        record.insert(tag, decoded);
    }
    Ok(record)
}

/// Render a player record as the raw tagged-tree JSON ("decodedjson").
pub fn to_decoded_json(player: &PlayerRecord) -> Value {
    record_to_json(player, false)
}

/// Parse a raw tagged-tree JSON document ("decodedjson") back into a
/// player record.
pub fn from_decoded_json(value: &Value) -> Result<PlayerRecord> {
    json_to_record(value)
}

/// Render a player record as the Latin-1-cast JSON variant ("json").
pub fn to_json(player: &PlayerRecord) -> Value {
    record_to_json(player, true)
}

/// Parse a Latin-1-cast JSON document ("json") back into a player
/// record.
pub fn from_json(value: &Value) -> Result<PlayerRecord> {
    json_to_record(value)
}

/// Guess whether `value` is a raw tagged-tree dump (`decodedjson`,
/// numeric byte arrays) rather than the Latin-1-cast variant (`json`,
/// byte strings), by looking for the first `Bytes`-shaped field and
/// checking how it was rendered. Records with no byte fields at all are
/// treated as raw dumps, since that's the more permissive parse.
pub fn looks_like_raw_dump(value: &Value) -> bool {
    fn first_bytes_shape(value: &Value) -> Option<bool> {
        match value {
            Value::Object(obj) => {
                if obj.contains_key("bytes") {
                    return Some(true);
                }
                if obj.contains_key("text") {
                    return Some(false);
                }
                obj.values().find_map(first_bytes_shape)
            }
            Value::Array(items) => items.iter().find_map(first_bytes_shape),
            _ => None,
        }
    }

    first_bytes_shape(value).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PlayerRecord {
        let mut player = PlayerRecord::new();
        player.insert(1, vec![FieldValue::Varint(72)]);
        player.insert(2, vec![FieldValue::Bytes(b"hello".to_vec())]);
        player.insert(3, vec![FieldValue::Fixed32(0x1122_3344), FieldValue::Fixed32(7)]);
        player
    }

    #[test]
    fn decoded_json_round_trips() {
        let player = sample_record();
        let value = to_decoded_json(&player);
        let back = from_decoded_json(&value).unwrap();
        assert_eq!(back, player);
    }

    #[test]
    fn latin1_json_round_trips() {
        let player = sample_record();
        let value = to_json(&player);
        let back = from_json(&value).unwrap();
        assert_eq!(back, player);
    }

    #[test]
    fn latin1_json_renders_bytes_as_text() {
        let player = sample_record();
        let value = to_json(&player);
        let rendered = &value["2"][0]["text"];
        assert_eq!(rendered.as_str().unwrap(), "hello");
    }

    #[test]
    fn raw_dump_detection_distinguishes_the_two_flavors() {
        let player = sample_record();
        assert!(looks_like_raw_dump(&to_decoded_json(&player)));
        assert!(!looks_like_raw_dump(&to_json(&player)));
    }

    #[test]
    fn non_latin1_text_is_rejected_on_import() {
        let bad = json!({ "text": "\u{1F600}" });
        assert!(json_to_field(&bad).is_err());
    }

    #[test]
    fn malformed_top_level_value_is_rejected() {
        assert!(from_decoded_json(&json!([1, 2, 3])).is_err());
    }
}
