//! Frame layout shared by every codec's prefixed path:
//!
//! ```text
//! [varint: uncompressed length][codec payload ...]
//! ```
//!
//! The raw-span path carries only the payload; the caller tracks the
//! uncompressed size on its own.

use std::io::Read;

use crate::error::{CodecError, Result};
use crate::region::RegionWriter;
use crate::varint;

// ── Codec IDs ──────────────────────────────────────────────────────────────
//
// Stored by the caller next to each block so it can pick the codec back up.

pub const CODEC_PASSTHROUGH: u8 = 0;
pub const CODEC_LZ4: u8 = 1;
pub const CODEC_ZLIB: u8 = 2;
pub const CODEC_ZSTD: u8 = 3;

/// Worst-case size of the length prefix.
pub const MAX_HEADER_LEN: usize = varint::MAX_VARINT_LEN;

/// Length prefix size for an input of `raw_len` bytes.
pub fn header_len(raw_len: usize) -> usize {
    u32::try_from(raw_len).map_or(MAX_HEADER_LEN, varint::encoded_len)
}

/// Write the length prefix for `raw_len` uncompressed bytes.
pub fn write_header(raw_len: usize, dest: &mut RegionWriter<'_>) -> Result<usize> {
    let value = u32::try_from(raw_len).map_err(|_| CodecError::InputTooLarge { len: raw_len })?;
    let (bytes, len) = varint::encode(value);
    dest.write_slice(&bytes[..len])?;
    Ok(len)
}

/// Read the length prefix from the front of a frame.
pub fn read_header<R: Read + ?Sized>(src: &mut R) -> Result<usize> {
    varint::read_varint(src).map(|len| len as usize)
}

/// Check that a payload decoded to the length its header announced.
pub fn verify_length(codec: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        return Ok(());
    }
    tracing::warn!(codec, expected, actual, "frame length mismatch");
    Err(CodecError::CorruptPayload {
        codec,
        detail: format!("frame header announced {expected} bytes but payload decoded to {actual}"),
    })
}
