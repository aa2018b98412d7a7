//! Error type for the field-record codec and structure mapper.

use thiserror::Error;

/// Errors that can occur decoding/encoding field records or applying a
/// schema to them.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// The byte stream ended in the middle of a varint, a fixed-width
    /// field, or a length-delimited blob.
    #[error("truncated field-record stream")]
    Truncated,

    /// A varint used more than 10 bytes (64 bits worth) without
    /// terminating.
    #[error("varint too long")]
    VarintTooLong,

    /// A wire type other than 0, 1, 2, or 5 was encountered.
    #[error("unsupported wire type {0}")]
    UnsupportedWireType(u8),

    /// `apply_structure`/`remove_structure` found a tag the schema did not
    /// describe, or the schema described a tag the data did not have.
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Result type alias used throughout `vaultsave-proto`.
pub type Result<T> = std::result::Result<T, ProtoError>;
