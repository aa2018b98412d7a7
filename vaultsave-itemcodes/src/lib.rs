//! # vaultsave-itemcodes
//!
//! Base-64 item-code listings and whole-record JSON interchange.
//!
//! This crate works purely on already-extracted pieces: wrapped
//! item/weapon blobs (as produced by `vaultsave-item`) and raw
//! [`vaultsave_proto::PlayerRecord`] trees. It has no opinion about
//! which save-file field tag holds the bank, the backpack, or
//! weapons — that wiring belongs to the caller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codes;
pub mod error;
pub mod json;

pub use codes::{
    ItemCodeFile, Section, decode_item_line, encode_item_line, format_item_code_file, import_item, is_synthetic,
    parse_item_code_file,
};
pub use error::{ItemCodesError, Result};
pub use json::{from_decoded_json, from_json, looks_like_raw_dump, to_decoded_json, to_json};
