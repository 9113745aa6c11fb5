pub mod codec;
pub mod error;
pub mod frame;
pub mod region;
pub mod stream;
pub mod varint;

pub use codec::Codec;
pub use error::{CodecError, Result};
pub use frame::{CODEC_LZ4, CODEC_PASSTHROUGH, CODEC_ZLIB, CODEC_ZSTD};
pub use region::{RegionReader, RegionWriter};
