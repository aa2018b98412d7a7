//! # vaultsave-proto
//!
//! Protobuf-like field-record codec ([`record`]) and the declarative
//! schema mapper ([`schema`]) that turns numeric-tag records into named,
//! typed trees and back.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod record;
pub mod schema;

pub use error::{ProtoError, Result};
pub use record::{FieldValue, PlayerRecord};
pub use schema::{RecordValue, SchemaEntry, StructuredRecord, WireKind, apply_structure, remove_structure};
