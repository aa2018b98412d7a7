//! Error type for the block compressor.

use thiserror::Error;

/// Errors that can occur decompressing or compressing an LZO1X-1 block.
#[derive(Debug, Error)]
pub enum LzoError {
    /// The command-byte dispatch encountered a stream that ended where more
    /// bytes were expected.
    #[error("truncated LZO1X stream")]
    Truncated,

    /// A back-reference distance was zero or pointed further back than any
    /// data decoded so far.
    #[error("invalid back-reference distance {distance} (decoded so far: {produced})")]
    InvalidDistance {
        /// The distance encoded in the stream.
        distance: usize,
        /// Number of output bytes decoded so far.
        produced: usize,
    },

    /// A back-reference length was out of the range the format allows.
    #[error("invalid back-reference length {length}")]
    InvalidLength {
        /// The offending length.
        length: usize,
    },
}

/// Result type alias used throughout `vaultsave-lzo`.
pub type Result<T> = std::result::Result<T, LzoError>;

impl LzoError {
    /// Build a [`LzoError::Truncated`].
    pub fn truncated() -> Self {
        Self::Truncated
    }

    /// Build a [`LzoError::InvalidDistance`].
    pub fn invalid_distance(distance: usize, produced: usize) -> Self {
        Self::InvalidDistance { distance, produced }
    }

    /// Build a [`LzoError::InvalidLength`].
    pub fn invalid_length(length: usize) -> Self {
        Self::InvalidLength { length }
    }
}
