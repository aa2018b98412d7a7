//! Error type for the outer save-file container codec.

use thiserror::Error;
use vaultsave_core::CoreError;
use vaultsave_lzo::LzoError;
use vaultsave_prefix::PrefixError;

/// Errors that can occur decoding or encoding the outer save container.
#[derive(Debug, Error)]
pub enum ContainerError {
    /// The file starts with `CON `, meaning it's a console host-wrapper
    /// file (e.g. from a Horizon/Modio extraction) rather than a raw
    /// `SaveGame.sav`.
    #[error("this looks like a console host-wrapper save; extract SaveGame.sav first")]
    HostWrapper,

    /// The file was too short to contain even the leading SHA-1 digest.
    #[error("save file too short: {len} bytes")]
    TooShort {
        /// The actual length encountered.
        len: usize,
    },

    /// The leading 20-byte digest didn't match SHA-1 of the rest of the
    /// file.
    #[error("invalid save file: digest mismatch")]
    DigestMismatch,

    /// The inner header's version field wasn't `2` or its byte-swapped
    /// form.
    #[error("unknown save version {version:#010x}")]
    UnknownVersion {
        /// The raw version value read (always interpreted big-endian).
        version: u32,
    },

    /// The inner header's magic bytes weren't `WSG`.
    #[error("bad inner header magic")]
    BadMagic,

    /// Checksum/bitstream errors from the block compressor.
    #[error(transparent)]
    Lzo(#[from] LzoError),

    /// Checksum/bitstream errors from the prefix-code codec.
    #[error(transparent)]
    Prefix(#[from] PrefixError),

    /// A CRC-32 or I/O error from `vaultsave-core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type alias used throughout `vaultsave-container`.
pub type Result<T> = std::result::Result<T, ContainerError>;
