//! Error type for the mutation engine.

use thiserror::Error;

/// Errors that can occur while applying a [`crate::Config`] to a player
/// record.
#[derive(Debug, Error)]
pub enum MutateError {
    /// A requested character level fell outside `1..=profile.max_level`.
    #[error("invalid character level: {level} (must be 1..={max})")]
    InvalidLevel {
        /// The level that was requested.
        level: u32,
        /// The profile's maximum level.
        max: u32,
    },

    /// A tag the mutation engine expected to find (possibly after an
    /// earlier step created it) was missing and had no fallback.
    #[error("expected save field {tag} to be present")]
    MissingField {
        /// The field-record tag that was missing.
        tag: u32,
    },

    /// A field held a value of the wrong shape for the operation being
    /// attempted (e.g. a bytes field where a varint was expected).
    #[error("save field {tag} had an unexpected shape: {reason}")]
    MalformedField {
        /// The field-record tag involved.
        tag: u32,
        /// What was wrong with it.
        reason: String,
    },

    /// Bubbled up from the field-record/schema codec.
    #[error(transparent)]
    Proto(#[from] vaultsave_proto::ProtoError),

    /// Bubbled up from the item codec.
    #[error(transparent)]
    Item(#[from] vaultsave_item::ItemError),

    /// Bubbled up from the challenge-log codec.
    #[error(transparent)]
    Challenge(#[from] vaultsave_challenge::ChallengeError),
}

/// Result type alias used throughout `vaultsave-mutate`.
pub type Result<T> = std::result::Result<T, MutateError>;
