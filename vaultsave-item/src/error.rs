//! Error type for the item/weapon record codec.

use thiserror::Error;
use vaultsave_core::CoreError;

/// Errors that can occur packing or unpacking an item/weapon record.
#[derive(Debug, Error)]
pub enum ItemError {
    /// A wrapped item blob was too short to contain even the 5-byte
    /// header (version/weapon byte + 4-byte key).
    #[error("item blob too short: {len} bytes")]
    TooShort {
        /// The actual length encountered.
        len: usize,
    },

    /// The checksum recovered from an unwrapped item did not match the
    /// CRC-32 (folded to 16 bits) computed over its header and payload.
    #[error(transparent)]
    Checksum(#[from] CoreError),

    /// The low 7 bits of the header byte didn't match any known item
    /// struct version (7 for Game A, 10 for Game B).
    #[error("unknown item struct version: {version}")]
    UnknownItemStructVersion {
        /// The version byte actually found.
        version: u8,
    },
}

impl ItemError {
    /// Build an [`ItemError::Checksum`] from a mismatched pair.
    pub fn checksum_mismatch(expected: u16, computed: u16) -> Self {
        Self::Checksum(CoreError::crc16_mismatch(expected, computed))
    }
}

/// Result type alias used throughout `vaultsave-item`.
pub type Result<T> = std::result::Result<T, ItemError>;
