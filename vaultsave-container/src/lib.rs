//! # vaultsave-container
//!
//! The outer save-file container codec: digest verification, LZO1X
//! decompression/compression, and the prefix-code-compressed inner
//! payload, composed from `vaultsave-core`, `vaultsave-lzo`, and
//! `vaultsave-prefix`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod container;
pub mod error;

pub use container::{decode, encode};
pub use error::{ContainerError, Result};
