//! The CLI's error type, layering every lower crate's error into the
//! four kinds the engine's design calls for, plus an I/O kind for the
//! concerns that only exist at the command-line boundary.

use thiserror::Error;

/// Top-level error returned by the `vaultsave` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// A digest or CRC check failed somewhere in the container or item
    /// codec.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// Bad magic, an unknown version, a malformed compressed stream, an
    /// unknown wire type, or a schema mismatch.
    #[error("format error: {0}")]
    Format(String),

    /// An unknown character class, ammo resource, or otherwise
    /// unrecognized catalog entry.
    #[error("content error: {0}")]
    Content(String),

    /// An out-of-range level, a nonsensical flag combination, or a
    /// refused file overwrite.
    #[error("configuration error: {0}")]
    Config(String),

    /// The input looked like a console host-wrapper file, or a file
    /// could not be read/written.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<vaultsave_container::ContainerError> for CliError {
    fn from(err: vaultsave_container::ContainerError) -> Self {
        use vaultsave_container::ContainerError as E;
        match err {
            E::HostWrapper => CliError::Io(err.to_string()),
            E::DigestMismatch => CliError::Integrity(err.to_string()),
            E::Core(vaultsave_core::CoreError::Crc32Mismatch { .. } | vaultsave_core::CoreError::Crc16Mismatch { .. }) => {
                CliError::Integrity(err.to_string())
            }
            E::TooShort { .. } | E::UnknownVersion { .. } | E::BadMagic | E::Lzo(_) | E::Prefix(_) | E::Core(_) => {
                CliError::Format(err.to_string())
            }
        }
    }
}

impl From<vaultsave_mutate::MutateError> for CliError {
    fn from(err: vaultsave_mutate::MutateError) -> Self {
        use vaultsave_mutate::MutateError as E;
        match err {
            E::InvalidLevel { .. } => CliError::Config(err.to_string()),
            E::Item(vaultsave_item::ItemError::Checksum(_)) => CliError::Integrity(err.to_string()),
            E::MissingField { .. } | E::MalformedField { .. } | E::Proto(_) | E::Item(_) | E::Challenge(_) => {
                CliError::Format(err.to_string())
            }
        }
    }
}

impl From<vaultsave_itemcodes::ItemCodesError> for CliError {
    fn from(err: vaultsave_itemcodes::ItemCodesError) -> Self {
        CliError::Format(err.to_string())
    }
}

impl From<vaultsave_proto::ProtoError> for CliError {
    fn from(err: vaultsave_proto::ProtoError) -> Self {
        CliError::Format(err.to_string())
    }
}

impl From<vaultsave_item::ItemError> for CliError {
    fn from(err: vaultsave_item::ItemError) -> Self {
        use vaultsave_item::ItemError as E;
        match err {
            E::Checksum(_) => CliError::Integrity(err.to_string()),
            E::TooShort { .. } | E::UnknownItemStructVersion { .. } => CliError::Format(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Format(format!("malformed JSON: {err}"))
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}

/// Result type alias used throughout the CLI.
pub type Result<T> = std::result::Result<T, CliError>;
