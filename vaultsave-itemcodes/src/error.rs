//! Error type for item-code and JSON interchange.

use thiserror::Error;

/// Errors that can occur importing/exporting item codes or JSON dumps.
#[derive(Debug, Error)]
pub enum ItemCodesError {
    /// A line in an item-code listing wasn't `PREFIX(<base64>)`.
    #[error("malformed item code line: {0:?}")]
    MalformedLine(String),

    /// An item code's prefix didn't match the one expected for the
    /// active game (`BL2` or `BLTPS`).
    #[error("unexpected item code prefix {found:?}, expected {expected:?}")]
    UnexpectedPrefix {
        /// The prefix actually found.
        found: String,
        /// The prefix the caller asked for.
        expected: String,
    },

    /// Base-64 decoding of an item code's payload failed.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    /// A JSON document didn't have the shape expected for a decoded or
    /// schema-mapped save dump.
    #[error("malformed save JSON: {0}")]
    MalformedJson(String),

    /// Bubbled up from the field-record codec.
    #[error(transparent)]
    Proto(#[from] vaultsave_proto::ProtoError),

    /// Bubbled up from the item codec.
    #[error(transparent)]
    Item(#[from] vaultsave_item::ItemError),
}

/// Result type alias used throughout `vaultsave-itemcodes`.
pub type Result<T> = std::result::Result<T, ItemCodesError>;
