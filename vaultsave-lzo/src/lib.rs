//! # vaultsave-lzo
//!
//! LZO1X-1 compatible block compressor/decompressor, used by the outer
//! container codec to inflate and deflate the compressed inner payload.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block;
pub mod error;

pub use block::{compress_block, decompress_block};
pub use error::{LzoError, Result};
