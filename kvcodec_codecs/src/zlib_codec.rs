use std::num::NonZeroU8;

use flate2::read::{ZlibDecoder, ZlibEncoder};
use flate2::Compression;
use kvcodec_core::frame::{self, CODEC_ZLIB};
use kvcodec_core::stream::copy;
use kvcodec_core::varint::encode_varint_to_vec;
use kvcodec_core::{Codec, CodecError, RegionReader, RegionWriter, Result};

/// Compression levels recognised by the zlib codec.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompressionLevel {
    /// Favour speed over compression ratio.
    Fast,
    /// zlib's default balance between speed and ratio.
    #[default]
    Default,
    /// Favour the best possible compression ratio.
    Best,
    /// An explicit zlib level in `1..=9`.
    Precise(NonZeroU8),
}

impl CompressionLevel {
    /// Build a [`CompressionLevel::Precise`] from a numeric zlib level.
    ///
    /// Accepts `1..=9`; level `0` (store only) is not a compression level
    /// from the engine's point of view and is rejected along with anything
    /// above 9.
    pub fn from_numeric(level: u32) -> std::result::Result<Self, CompressionLevelError> {
        match u8::try_from(level).ok().filter(|l| *l <= 9).and_then(NonZeroU8::new) {
            Some(precise) => Ok(Self::Precise(precise)),
            None => Err(CompressionLevelError { level }),
        }
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::Fast => Compression::fast(),
            CompressionLevel::Default => Compression::default(),
            CompressionLevel::Best => Compression::best(),
            CompressionLevel::Precise(value) => Compression::new(u32::from(value.get())),
        }
    }
}

/// A requested zlib level outside `1..=9`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("compression level {level} is outside the supported range 1-9")]
pub struct CompressionLevelError {
    level: u32,
}

impl CompressionLevelError {
    /// The rejected level.
    pub fn level(&self) -> u32 {
        self.level
    }
}

/// Streaming zlib (deflate) codec.
///
/// The payload is a zlib-wrapped deflate stream, so a damaged header or
/// Adler-32 trailer is caught on decode. Input is pumped through the
/// encoder and into the destination region in 1 KiB steps; nothing is
/// buffered beyond the encoder's own window.
///
/// Best for: cold blocks where ratio matters more than speed.
#[derive(Debug, Default, Clone, Copy)]
pub struct ZlibCodec {
    pub level: CompressionLevel,
}

impl ZlibCodec {
    pub fn new(level: CompressionLevel) -> Self {
        Self { level }
    }
}

/// Worst-case zlib stream size for `len` input bytes at any level.
///
/// zlib's own `compressBound()` assumes its deflate implementation; the fast
/// level of the bundled backend emits slightly more on incompressible input,
/// so this allows one byte in 64 plus room for header, trailer and empty
/// block framing.
fn zlib_bound(len: usize) -> usize {
    len + (len >> 6) + 64
}

impl Codec for ZlibCodec {
    fn id(&self) -> u8 {
        CODEC_ZLIB
    }

    fn name(&self) -> &'static str {
        "zlib"
    }

    fn max_compressed_length(&self, len: usize) -> usize {
        frame::header_len(len) + zlib_bound(len)
    }

    fn compress_raw(&self, input: &[u8], dest: &mut RegionWriter<'_>) -> Result<usize> {
        let mut encoder = ZlibEncoder::new(input, self.level.into());
        let written = copy(&mut encoder, dest).map_err(|e| CodecError::compression("zlib", e))?;
        Ok(written as usize)
    }

    fn uncompress_raw(&self, src: &mut RegionReader<'_>, dest: &mut RegionWriter<'_>) -> Result<usize> {
        let mut decoder = ZlibDecoder::new(&mut *src);
        let written = copy(&mut decoder, dest).map_err(|e| CodecError::corrupt("zlib", e))?;
        Ok(written as usize)
    }

    fn compress_text(&self, text: &str) -> Result<Vec<u8>> {
        let input = text.as_bytes();
        let raw_len = u32::try_from(input.len()).map_err(|_| CodecError::InputTooLarge { len: input.len() })?;
        let mut out = Vec::with_capacity(self.max_compressed_length(input.len()));
        encode_varint_to_vec(raw_len, &mut out);
        let mut encoder = ZlibEncoder::new(input, self.level.into());
        copy(&mut encoder, &mut out).map_err(|e| CodecError::compression("zlib", e))?;
        Ok(out)
    }
}
