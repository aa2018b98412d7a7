//! Error type for the challenge-log block codec.

use thiserror::Error;

/// Errors that can occur decoding a challenge-log block.
#[derive(Debug, Error)]
pub enum ChallengeError {
    /// The block was too short to contain the 10-byte header.
    #[error("challenge block too short for header: {len} bytes")]
    TooShort {
        /// The actual length encountered.
        len: usize,
    },

    /// The header's reported `size_in_bytes` doesn't match the actual
    /// block length (`size_in_bytes + 8 == data.len()`).
    #[error("challenge data reported as {size_in_bytes} bytes, but {actual} bytes found")]
    SizeMismatch {
        /// `size_in_bytes` as read from the header.
        size_in_bytes: u32,
        /// The block length actually available, minus the 8-byte prefix.
        actual: u32,
    },

    /// The header's reported challenge count doesn't agree with
    /// `size_in_bytes` (`count * 12 == size_in_bytes - 2`).
    #[error("{count} challenges reported, but {bytes} bytes of data found")]
    CountMismatch {
        /// `num_challenges` as read from the header.
        count: u16,
        /// `size_in_bytes - 2` as read from the header.
        bytes: u32,
    },
}

/// Result type alias used throughout `vaultsave-challenge`.
pub type Result<T> = std::result::Result<T, ChallengeError>;
