use kvcodec_core::frame::{self, CODEC_PASSTHROUGH};
use kvcodec_core::{Codec, RegionReader, RegionWriter, Result};

/// No-op codec: stores blocks verbatim, with no compression.
///
/// Useful for:
/// - Verifying the frame round-trip independently of any algorithm.
/// - Blocks whose values are already compressed, where another pass would
///   only expand them.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughCodec;

impl Codec for PassThroughCodec {
    fn id(&self) -> u8 {
        CODEC_PASSTHROUGH
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }

    fn max_compressed_length(&self, len: usize) -> usize {
        frame::header_len(len) + len
    }

    fn compress_raw(&self, input: &[u8], dest: &mut RegionWriter<'_>) -> Result<usize> {
        dest.write_slice(input)?;
        Ok(input.len())
    }

    fn uncompress_raw(&self, src: &mut RegionReader<'_>, dest: &mut RegionWriter<'_>) -> Result<usize> {
        let payload = src.remaining_slice();
        dest.write_slice(payload)?;
        src.consume(payload.len());
        Ok(payload.len())
    }
}
