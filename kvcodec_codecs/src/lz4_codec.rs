use std::cell::RefCell;

use kvcodec_core::frame::{self, CODEC_LZ4};
use kvcodec_core::{Codec, CodecError, RegionReader, RegionWriter, Result};
use lz4_flex::block::{compress_into, decompress_into, get_maximum_output_size, CompressError, DecompressError};

thread_local! {
    // worst-case staging for regions too small to encode into directly
    static SCRATCH: RefCell<Vec<u8>> = const { RefCell::new(Vec::new()) };
}

/// LZ4 block codec.
///
/// The fast byte-oriented codec: raw LZ4 blocks (no frame header or
/// checksum) encoded straight into the destination region. Unlike the
/// streaming codecs its [`Codec::max_compressed_length`] is exact worst-case
/// sizing, so callers can pre-size regions without retrying.
///
/// A region smaller than that worst case is still accepted: the block is
/// encoded into a per-thread scratch buffer and copied over. The scratch
/// grows to the largest such block seen on the thread and is reused, so the
/// steady state does not allocate.
///
/// Best for: hot blocks where decode latency matters more than ratio.
#[derive(Debug, Default, Clone, Copy)]
pub struct Lz4Codec;

impl Codec for Lz4Codec {
    fn id(&self) -> u8 {
        CODEC_LZ4
    }

    fn name(&self) -> &'static str {
        "lz4"
    }

    fn max_compressed_length(&self, len: usize) -> usize {
        frame::header_len(len) + get_maximum_output_size(len)
    }

    fn compress_raw(&self, input: &[u8], dest: &mut RegionWriter<'_>) -> Result<usize> {
        // lz4_flex only encodes in place when the worst case fits
        let worst = get_maximum_output_size(input.len());
        if dest.remaining() < worst {
            return SCRATCH.with(|scratch| {
                let mut scratch = scratch.borrow_mut();
                if scratch.len() < worst {
                    scratch.resize(worst, 0);
                }
                let written = compress_into(input, &mut scratch[..worst]).map_err(compression_error)?;
                dest.write_slice(&scratch[..written])?;
                Ok(written)
            });
        }
        let written = compress_into(input, dest.unfilled_mut()).map_err(compression_error)?;
        dest.advance(written)?;
        Ok(written)
    }

    fn uncompress_raw(&self, src: &mut RegionReader<'_>, dest: &mut RegionWriter<'_>) -> Result<usize> {
        let payload = src.remaining_slice();
        let start = dest.position();
        let available = dest.remaining();
        let written = decompress_into(payload, dest.unfilled_mut()).map_err(|e| match e {
            DecompressError::OutputTooSmall { expected, .. } => CodecError::CapacityExceeded {
                required: start + expected.max(available + 1),
                capacity: start + available,
            },
            other => CodecError::CorruptPayload {
                codec: "lz4",
                detail: other.to_string(),
            },
        })?;
        dest.advance(written)?;
        src.consume(payload.len());
        Ok(written)
    }
}

fn compression_error(e: CompressError) -> CodecError {
    CodecError::Compression {
        codec: "lz4",
        detail: e.to_string(),
    }
}
