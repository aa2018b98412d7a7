//! # vaultsave-core
//!
//! Foundational building blocks shared by every layer of the save-file
//! codec: bit-level I/O and the CRC-32 checksum used both by the outer
//! container and (folded to 16 bits) by the item codec.
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │ Outer container (digest, header, framing)           │
//! ├────────────────────────────────────────────────────┤
//! │ Block compressor │ Prefix-code codec                 │
//! ├────────────────────────────────────────────────────┤
//! │ Field-record codec │ Structure mapper                │
//! ├────────────────────────────────────────────────────┤
//! │ BitReader/BitWriter, CRC-32  (this crate)            │
//! └────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bitstream;
pub mod crc;
pub mod endian;
pub mod error;

pub use bitstream::{BitReader, BitWriter};
pub use crc::Crc32;
pub use endian::Endian;
pub use error::{CoreError, Result};
