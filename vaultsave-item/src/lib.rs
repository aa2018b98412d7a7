//! # vaultsave-item
//!
//! The bit-packed, obfuscated item/weapon record codec: variable-width
//! field packing ([`pack_item_values`]/[`unpack_item_values`]) wrapped in
//! a CRC-derived checksum and a rotate-then-XOR obfuscation layer
//! ([`wrap_item`]/[`unwrap_item`]).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod obfuscate;
pub mod pack;
pub mod wrap;

pub use error::{ItemError, Result};
pub use obfuscate::{rotate_left, rotate_right, xor_stream};
pub use pack::{pack_item_values, unpack_item_values};
pub use wrap::{replace_key, unwrap_item, verify_checksum, wrap_item};
