//! Declarative schema mapper: translates a numeric-tag [`PlayerRecord`]
//! into a named, typed [`StructuredRecord`] tree and back again.
//!
//! Tags the schema doesn't mention are copied verbatim into the
//! structured record's `raw` side-channel, so `remove_structure` can
//! reproduce the original bytes exactly even for fields this codec
//! doesn't otherwise understand.

use std::collections::BTreeMap;

use crate::error::{ProtoError, Result};
use crate::record::{FieldValue, PlayerRecord, read_repeated, write_repeated};

/// The wire-level shape a schema leaf expects its value to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    /// Wire type 0.
    Varint,
    /// Wire type 5.
    Fixed32,
    /// Wire type 1.
    Fixed64,
    /// Wire type 2 (raw bytes, not a nested record).
    Bytes,
}

/// One entry in a declarative schema: how to interpret the values stored
/// at a given field tag.
#[derive(Debug, Clone)]
pub enum SchemaEntry {
    /// A single scalar value.
    Leaf {
        /// Field name in the structured tree.
        name: &'static str,
        /// Expected wire representation.
        kind: WireKind,
    },
    /// A `Bytes` field whose contents are a packed-repeated run of
    /// same-typed scalars.
    Repeated {
        /// Field name in the structured tree.
        name: &'static str,
        /// Wire representation of each packed element.
        inner: WireKind,
    },
    /// A nested sub-record, itself described by another schema.
    Nested {
        /// Field name in the structured tree.
        name: &'static str,
        /// Whether this tag may repeat (multiple sibling sub-records).
        repeated: bool,
        /// Schema describing the nested record's own tags.
        schema: &'static [(u32, SchemaEntry)],
    },
}

/// A decoded, named value in a [`StructuredRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A scalar integer (varint, fixed32, or fixed64, widened to i64).
    Int(i64),
    /// A raw byte string.
    Bytes(Vec<u8>),
    /// A nested structured record.
    Record(Box<StructuredRecord>),
    /// A repeated value: either packed scalars or sibling sub-records.
    List(Vec<RecordValue>),
}

/// A [`PlayerRecord`] mapped through a schema into named fields, with
/// schema-unaware tags preserved in `raw` for byte-exact round-trip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuredRecord {
    /// Named, typed fields the schema recognized.
    pub fields: BTreeMap<String, RecordValue>,
    /// Tags the schema did not mention, preserved verbatim.
    pub raw: PlayerRecord,
}

fn leaf_to_record_value(value: &FieldValue) -> RecordValue {
    match value {
        FieldValue::Varint(v) => RecordValue::Int(*v as i64),
        FieldValue::Fixed32(v) => RecordValue::Int(*v as i64),
        FieldValue::Fixed64(v) => RecordValue::Int(*v as i64),
        FieldValue::Bytes(b) => RecordValue::Bytes(b.clone()),
    }
}

fn record_value_to_field(value: &RecordValue, kind: WireKind) -> Result<FieldValue> {
    match (value, kind) {
        (RecordValue::Int(v), WireKind::Varint) => Ok(FieldValue::Varint(*v as u64)),
        (RecordValue::Int(v), WireKind::Fixed32) => Ok(FieldValue::Fixed32(*v as u32)),
        (RecordValue::Int(v), WireKind::Fixed64) => Ok(FieldValue::Fixed64(*v as u64)),
        (RecordValue::Bytes(b), WireKind::Bytes) => Ok(FieldValue::Bytes(b.clone())),
        _ => Err(ProtoError::SchemaMismatch(
            "record value does not match the schema's declared wire kind".into(),
        )),
    }
}

/// Map `record` through `schema` into a [`StructuredRecord`].
pub fn apply_structure(record: &PlayerRecord, schema: &[(u32, SchemaEntry)]) -> Result<StructuredRecord> {
    let mut remaining = record.clone();
    let mut fields = BTreeMap::new();

    for (tag, entry) in schema {
        let Some(values) = remaining.remove(tag) else {
            continue;
        };

        match entry {
            SchemaEntry::Leaf { name, .. } => {
                let value = values
                    .first()
                    .ok_or_else(|| ProtoError::SchemaMismatch(format!("tag {tag} had no values")))?;
                fields.insert((*name).to_string(), leaf_to_record_value(value));
            }
            SchemaEntry::Repeated { name, inner } => {
                let blob = match values.first() {
                    Some(FieldValue::Bytes(b)) => b,
                    _ => {
                        return Err(ProtoError::SchemaMismatch(format!(
                            "tag {tag} expected a packed-repeated byte blob"
                        )));
                    }
                };
                let wire_type = match inner {
                    WireKind::Varint => 0,
                    WireKind::Fixed64 => 1,
                    WireKind::Bytes => 2,
                    WireKind::Fixed32 => 5,
                };
                let items = read_repeated(blob, wire_type)?;
                let list = items.iter().map(leaf_to_record_value).collect();
                fields.insert((*name).to_string(), RecordValue::List(list));
            }
            SchemaEntry::Nested {
                name,
                repeated,
                schema: nested_schema,
            } => {
                let mut sub_records = Vec::new();
                for value in &values {
                    let FieldValue::Bytes(blob) = value else {
                        return Err(ProtoError::SchemaMismatch(format!(
                            "tag {tag} expected a nested record"
                        )));
                    };
                    let nested = crate::record::decode(blob)?;
                    sub_records.push(apply_structure(&nested, nested_schema)?);
                }

                if *repeated {
                    let list = sub_records.into_iter().map(|r| RecordValue::Record(Box::new(r))).collect();
                    fields.insert((*name).to_string(), RecordValue::List(list));
                } else {
                    let only = sub_records
                        .into_iter()
                        .next()
                        .ok_or_else(|| ProtoError::SchemaMismatch(format!("tag {tag} had no values")))?;
                    fields.insert((*name).to_string(), RecordValue::Record(Box::new(only)));
                }
            }
        }
    }

    Ok(StructuredRecord {
        fields,
        raw: remaining,
    })
}

/// Inverse of [`apply_structure`]: rebuild a [`PlayerRecord`] from a
/// structured tree, starting from its preserved `raw` tags.
pub fn remove_structure(structured: &StructuredRecord, schema: &[(u32, SchemaEntry)]) -> Result<PlayerRecord> {
    let mut record = structured.raw.clone();

    for (tag, entry) in schema {
        let name = match entry {
            SchemaEntry::Leaf { name, .. } => *name,
            SchemaEntry::Repeated { name, .. } => *name,
            SchemaEntry::Nested { name, .. } => *name,
        };
        let Some(value) = structured.fields.get(name) else {
            continue;
        };

        match entry {
            SchemaEntry::Leaf { kind, .. } => {
                record.insert(*tag, vec![record_value_to_field(value, *kind)?]);
            }
            SchemaEntry::Repeated { inner, .. } => {
                let RecordValue::List(items) = value else {
                    return Err(ProtoError::SchemaMismatch(format!(
                        "field {name} expected a packed-repeated list"
                    )));
                };
                let field_values: Vec<FieldValue> = items
                    .iter()
                    .map(|v| record_value_to_field(v, *inner))
                    .collect::<Result<_>>()?;
                let blob = write_repeated(&field_values);
                record.insert(*tag, vec![FieldValue::Bytes(blob)]);
            }
            SchemaEntry::Nested {
                repeated,
                schema: nested_schema,
                ..
            } => {
                let sub_records: Vec<&StructuredRecord> = if *repeated {
                    let RecordValue::List(items) = value else {
                        return Err(ProtoError::SchemaMismatch(format!(
                            "field {name} expected a list of nested records"
                        )));
                    };
                    items
                        .iter()
                        .map(|v| match v {
                            RecordValue::Record(r) => Ok(r.as_ref()),
                            _ => Err(ProtoError::SchemaMismatch(format!(
                                "field {name} contained a non-record list item"
                            ))),
                        })
                        .collect::<Result<_>>()?
                } else {
                    let RecordValue::Record(r) = value else {
                        return Err(ProtoError::SchemaMismatch(format!("field {name} expected a record")));
                    };
                    vec![r.as_ref()]
                };

                let mut values = Vec::new();
                for sub in sub_records {
                    let nested_record = remove_structure(sub, nested_schema)?;
                    values.push(FieldValue::Bytes(crate::record::encode(&nested_record)));
                }
                record.insert(*tag, values);
            }
        }
    }

    Ok(record)
}
