mod lz4_codec;
mod passthrough;
mod zlib_codec;
mod zstd_codec;

pub use lz4_codec::Lz4Codec;
pub use passthrough::PassThroughCodec;
pub use zlib_codec::{CompressionLevel, CompressionLevelError, ZlibCodec};
pub use zstd_codec::ZstdCodec;

use kvcodec_core::frame::{CODEC_LZ4, CODEC_PASSTHROUGH, CODEC_ZLIB, CODEC_ZSTD};
use kvcodec_core::{Codec, CodecError, Result};
use std::sync::Arc;

/// Resolve a codec from the id the storage engine stored next to a block.
///
/// Codecs come back with their default configuration; decoding never
/// depends on the level a block was written with.
pub fn codec_by_id(id: u8) -> Result<Arc<dyn Codec>> {
    let codec: Arc<dyn Codec> = match id {
        CODEC_PASSTHROUGH => Arc::new(PassThroughCodec),
        CODEC_LZ4 => Arc::new(Lz4Codec),
        CODEC_ZLIB => Arc::new(ZlibCodec::default()),
        CODEC_ZSTD => Arc::new(ZstdCodec::default()),
        _ => return Err(CodecError::UnknownCodec(id)),
    };
    tracing::debug!(id, codec = codec.name(), "resolved codec");
    Ok(codec)
}

/// Resolve a codec from a configuration name.
pub fn codec_by_name(name: &str) -> Result<Arc<dyn Codec>> {
    let id = match name.trim().to_ascii_lowercase().as_str() {
        "passthrough" | "pass" | "none" => CODEC_PASSTHROUGH,
        "lz4" => CODEC_LZ4,
        "zlib" | "deflate" => CODEC_ZLIB,
        "zstd" => CODEC_ZSTD,
        _ => return Err(CodecError::UnknownCodecName(name.to_string())),
    };
    codec_by_id(id)
}

/// Every bundled codec usable in this process, in id order.
pub fn bundled_codecs() -> Vec<Arc<dyn Codec>> {
    [CODEC_PASSTHROUGH, CODEC_LZ4, CODEC_ZLIB, CODEC_ZSTD]
        .into_iter()
        .filter_map(|id| codec_by_id(id).ok())
        .filter(|codec| codec.available())
        .collect()
}
