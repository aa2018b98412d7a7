//! Error types shared by every layer of the save-file codec stack.
//!
//! Each downstream crate (`vaultsave-lzo`, `vaultsave-proto`, ...) defines
//! its own narrower error enum and converts into this one at its boundary,
//! so a `CoreError` at the bottom of the stack never has to guess at a
//! higher layer's vocabulary.

use thiserror::Error;

/// Errors that can occur doing bit-level I/O or checksum verification.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Underlying I/O error from the wrapped reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bitstream ended before the requested number of bits was available.
    #[error("unexpected end of bitstream: needed {needed} more bits")]
    UnexpectedEof {
        /// Number of bits that were requested but unavailable.
        needed: u8,
    },

    /// A CRC-32 check failed.
    #[error("CRC-32 mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    Crc32Mismatch {
        /// Expected value, taken from the container.
        expected: u32,
        /// Value actually computed over the data.
        computed: u32,
    },

    /// A CRC-16 check failed.
    #[error("CRC-16 mismatch: expected {expected:#06x}, computed {computed:#06x}")]
    Crc16Mismatch {
        /// Expected value, taken from the record.
        expected: u16,
        /// Value actually computed over the data.
        computed: u16,
    },
}

/// Result type alias used throughout `vaultsave-core`.
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Build an [`CoreError::UnexpectedEof`] for `needed` missing bits.
    pub fn unexpected_eof(needed: u8) -> Self {
        Self::UnexpectedEof { needed }
    }

    /// Build a [`CoreError::Crc32Mismatch`].
    pub fn crc32_mismatch(expected: u32, computed: u32) -> Self {
        Self::Crc32Mismatch { expected, computed }
    }

    /// Build a [`CoreError::Crc16Mismatch`].
    pub fn crc16_mismatch(expected: u16, computed: u16) -> Self {
        Self::Crc16Mismatch { expected, computed }
    }
}
