use kvcodec_core::frame::{self, CODEC_ZSTD};
use kvcodec_core::stream::copy;
use kvcodec_core::varint::encode_varint_to_vec;
use kvcodec_core::{Codec, CodecError, RegionReader, RegionWriter, Result};
use zstd::stream::read::{Decoder, Encoder};

/// Zstandard block codec.
///
/// Each block is one independent zstd frame, streamed through the shared
/// copy loop like the zlib codec. The frame carries its own magic number, so
/// feeding it a payload from another codec fails cleanly.
///
/// Best for: mixed structured data where zlib is too slow and lz4 too loose.
#[derive(Debug, Clone, Copy)]
pub struct ZstdCodec {
    /// Compression level (1 = fast / larger, 22 = slow / smallest).
    pub level: i32,
}

impl Default for ZstdCodec {
    fn default() -> Self {
        Self { level: 3 }
    }
}

impl ZstdCodec {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

impl Codec for ZstdCodec {
    fn id(&self) -> u8 {
        CODEC_ZSTD
    }

    fn name(&self) -> &'static str {
        "zstd"
    }

    fn max_compressed_length(&self, len: usize) -> usize {
        frame::header_len(len) + zstd::zstd_safe::compress_bound(len)
    }

    fn compress_raw(&self, input: &[u8], dest: &mut RegionWriter<'_>) -> Result<usize> {
        let mut encoder = Encoder::new(input, self.level).map_err(|e| CodecError::compression("zstd", e))?;
        let written = copy(&mut encoder, dest).map_err(|e| CodecError::compression("zstd", e))?;
        Ok(written as usize)
    }

    fn uncompress_raw(&self, src: &mut RegionReader<'_>, dest: &mut RegionWriter<'_>) -> Result<usize> {
        let mut decoder = Decoder::new(&mut *src).map_err(|e| CodecError::corrupt("zstd", e))?;
        let written = copy(&mut decoder, dest).map_err(|e| CodecError::corrupt("zstd", e))?;
        Ok(written as usize)
    }

    fn compress_text(&self, text: &str) -> Result<Vec<u8>> {
        let input = text.as_bytes();
        let raw_len = u32::try_from(input.len()).map_err(|_| CodecError::InputTooLarge { len: input.len() })?;
        let mut out = Vec::new();
        encode_varint_to_vec(raw_len, &mut out);
        let mut encoder = Encoder::new(input, self.level).map_err(|e| CodecError::compression("zstd", e))?;
        copy(&mut encoder, &mut out).map_err(|e| CodecError::compression("zstd", e))?;
        Ok(out)
    }
}
