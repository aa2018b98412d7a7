//! # vaultsave-prefix
//!
//! Adaptive prefix-code (Huffman-style) tree codec used by the outer
//! container to compress/decompress the already-LZO-compressed inner
//! payload's residual entropy.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod tree;

pub use error::{PrefixError, Result};
pub use tree::{Node, build_tree, decode_symbols, encode_symbols, read_tree, write_tree};

use std::io::Cursor;
use vaultsave_core::{BitReader, BitWriter};

/// Compress `data` into a self-contained prefix-coded block: the
/// serialized tree followed by the bit-packed symbols.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let tree = build_tree(data);
    let mut bytes = Vec::new();
    {
        let mut writer = BitWriter::new(&mut bytes);
        write_tree(&mut writer, &tree)?;
        encode_symbols(&mut writer, &tree, data)?;
        writer.flush()?;
    }
    Ok(bytes)
}

/// Decompress a block previously produced by [`compress`]. The caller must
/// know the decoded length up front, since the bitstream carries no
/// terminator of its own.
pub fn decompress(data: &[u8], decoded_len: usize) -> Result<Vec<u8>> {
    let mut reader = BitReader::new(Cursor::new(data));
    let tree = read_tree(&mut reader)?;
    decode_symbols(&mut reader, &tree, decoded_len)
}
