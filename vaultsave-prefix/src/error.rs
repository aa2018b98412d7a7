//! Error type for the prefix-code tree codec.

use thiserror::Error;

/// Errors that can occur building, serializing, or walking a prefix-code
/// tree.
#[derive(Debug, Error)]
pub enum PrefixError {
    /// Bit-level I/O failed (ran out of input, or the underlying writer
    /// failed).
    #[error("bit I/O error: {0}")]
    Core(#[from] vaultsave_core::CoreError),

    /// The serialized tree was malformed (e.g. recursion went past the
    /// byte-value leaf depth without terminating).
    #[error("malformed prefix-code tree")]
    MalformedTree,
}

/// Result type alias used throughout `vaultsave-prefix`.
pub type Result<T> = std::result::Result<T, PrefixError>;
