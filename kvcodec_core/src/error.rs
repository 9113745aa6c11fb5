use std::io;

/// Failures reported by the codec layer.
///
/// Nothing here is retried or rolled back: when a call fails, whatever was
/// already written into the destination region is garbage and the caller
/// must discard it.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The destination region is too small for the bytes being written.
    #[error("destination region too small: {required} bytes required, capacity is {capacity}")]
    CapacityExceeded { required: usize, capacity: usize },

    /// A varint length prefix was truncated or does not fit in 32 bits.
    #[error("malformed varint: {0}")]
    MalformedVarint(&'static str),

    /// The compressed stream failed structural or checksum validation, or
    /// decoded to a different length than its frame header announced.
    #[error("corrupt {codec} payload: {detail}")]
    CorruptPayload { codec: &'static str, detail: String },

    /// The encoder itself reported a failure.
    #[error("{codec} compression failed: {detail}")]
    Compression { codec: &'static str, detail: String },

    /// A region or span request does not fit inside its backing buffer.
    #[error("span [{offset}, {offset}+{len}) lies outside a buffer of {available} bytes")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    /// The input is longer than a 32-bit length prefix can describe.
    #[error("input of {len} bytes exceeds the 32-bit frame length limit")]
    InputTooLarge { len: usize },

    #[error("unknown codec id {0}")]
    UnknownCodec(u8),

    #[error("unknown codec name '{0}'")]
    UnknownCodecName(String),
}

impl CodecError {
    /// Recover the error raised by a decompression stream.
    ///
    /// Region adapters smuggle [`CodecError`]s through `io::Error`; those are
    /// unwrapped unchanged. Anything else came from the algorithm rejecting
    /// its input and is reported as [`CodecError::CorruptPayload`].
    pub fn corrupt(codec: &'static str, err: io::Error) -> Self {
        match unwrap_io(err) {
            Ok(inner) => inner,
            Err(detail) => Self::CorruptPayload { codec, detail },
        }
    }

    /// Recover the error raised by a compression stream.
    ///
    /// Same unwrapping as [`CodecError::corrupt`], but foreign errors are
    /// reported as [`CodecError::Compression`].
    pub fn compression(codec: &'static str, err: io::Error) -> Self {
        match unwrap_io(err) {
            Ok(inner) => inner,
            Err(detail) => Self::Compression { codec, detail },
        }
    }
}

fn unwrap_io(err: io::Error) -> std::result::Result<CodecError, String> {
    let kind = err.kind();
    match err.into_inner() {
        Some(inner) => match inner.downcast::<CodecError>() {
            Ok(codec_err) => Ok(*codec_err),
            Err(other) => Err(other.to_string()),
        },
        None => Err(kind.to_string()),
    }
}

impl From<CodecError> for io::Error {
    fn from(err: CodecError) -> Self {
        io::Error::other(err)
    }
}

pub type Result<T, E = CodecError> = std::result::Result<T, E>;
