//! Integration tests: every bundled codec honours the same contract.
//!
//!  1. Framed and raw payloads round-trip byte-exact.
//!  2. Destination regions are hard limits: an exactly sized region works,
//!     one byte less fails with `CapacityExceeded`.
//!  3. One shared codec value serves many threads with results identical to
//!     sequential calls.

use std::sync::Arc;
use std::thread;

use kvcodec_codecs::{bundled_codecs, Lz4Codec, ZlibCodec};
use kvcodec_core::{Codec, CodecError, RegionReader, RegionWriter};
use proptest::prelude::*;

/// Generate `len` deterministic bytes using a simple LCG.
fn pseudo_random_bytes(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (rng >> 56) as u8
        })
        .collect()
}

/// Generate `len` highly compressible bytes (repeating pattern).
fn compressible_bytes(len: usize) -> Vec<u8> {
    let pattern = b"the quick brown fox jumps over the lazy dog. ";
    (0..len).map(|i| pattern[i % pattern.len()]).collect()
}

// ── helpers ───────────────────────────────────────────────────────────────

fn compress_framed(codec: &dyn Codec, data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut out = vec![0u8; codec.max_compressed_length(data.len())];
    let n = codec.compress(data, &mut RegionWriter::new(&mut out))?;
    out.truncate(n);
    Ok(out)
}

fn uncompress_framed(codec: &dyn Codec, framed: &[u8], capacity: usize) -> anyhow::Result<Vec<u8>> {
    let mut out = vec![0u8; capacity];
    let n = codec.uncompress(&mut RegionReader::new(framed), &mut RegionWriter::new(&mut out))?;
    out.truncate(n);
    Ok(out)
}

fn compress_payload(codec: &dyn Codec, data: &[u8]) -> anyhow::Result<Vec<u8>> {
    let mut out = vec![0u8; codec.max_compressed_length(data.len())];
    let n = codec.compress_raw(data, &mut RegionWriter::new(&mut out))?;
    out.truncate(n);
    Ok(out)
}

// ── tests ──────────────────────────────────────────────────────────────────

#[test]
fn test_roundtrip_framed_all_codecs() -> anyhow::Result<()> {
    let data = compressible_bytes(64 * 1024 + 123);
    for codec in bundled_codecs() {
        let framed = compress_framed(codec.as_ref(), &data)?;
        let restored = uncompress_framed(codec.as_ref(), &framed, data.len())?;
        assert_eq!(restored, data, "{} framed round-trip", codec.name());
    }
    Ok(())
}

#[test]
fn test_roundtrip_raw_span_all_codecs() -> anyhow::Result<()> {
    let data = pseudo_random_bytes(10_000, 0xDEAD_BEEF);
    for codec in bundled_codecs() {
        let payload = compress_payload(codec.as_ref(), &data)?;

        // embed the payload in a larger buffer and decode into an offset window
        let mut input = vec![0xAAu8; 7];
        input.extend_from_slice(&payload);
        input.extend_from_slice(&[0x55; 9]);
        let mut output = vec![0u8; 3 + data.len()];
        let n = codec.uncompress_span(&input, 7, payload.len(), &mut output, 3)?;

        assert_eq!(n, data.len(), "{} raw length", codec.name());
        assert_eq!(&output[3..], data.as_slice(), "{} raw round-trip", codec.name());
        assert_eq!(&output[..3], &[0, 0, 0], "{} wrote before the window", codec.name());
    }
    Ok(())
}

#[test]
fn test_empty_input_produces_valid_frame() -> anyhow::Result<()> {
    for codec in bundled_codecs() {
        let framed = compress_framed(codec.as_ref(), &[])?;
        assert_eq!(framed[0], 0x00, "{} empty prefix", codec.name());
        let restored = uncompress_framed(codec.as_ref(), &framed, 0)?;
        assert!(restored.is_empty(), "{} empty round-trip", codec.name());
    }
    Ok(())
}

#[test]
fn test_hello_world_scenario() -> anyhow::Result<()> {
    let codec = ZlibCodec::default();
    let framed = codec.compress_text("hello world")?;
    assert_eq!(framed[0], 0x0B);
    let restored = uncompress_framed(&codec, &framed, 11)?;
    assert_eq!(restored, b"hello world");
    Ok(())
}

#[test]
fn test_exact_destination_size_is_enough() -> anyhow::Result<()> {
    let data = compressible_bytes(5000);
    for codec in bundled_codecs() {
        let required = compress_framed(codec.as_ref(), &data)?;

        let mut exact = vec![0u8; required.len()];
        let n = codec.compress(&data, &mut RegionWriter::new(&mut exact))?;
        assert_eq!(n, required.len(), "{} exact fit", codec.name());
        assert_eq!(exact, required);

        let mut short = vec![0u8; required.len() - 1];
        let err = codec
            .compress(&data, &mut RegionWriter::new(&mut short))
            .unwrap_err();
        assert!(
            matches!(err, CodecError::CapacityExceeded { .. }),
            "{} one byte short should be a capacity error, got: {err}",
            codec.name()
        );
    }
    Ok(())
}

#[test]
fn test_undersized_decompression_target_fails() {
    let data = compressible_bytes(3000);
    for codec in bundled_codecs() {
        let framed = compress_framed(codec.as_ref(), &data).unwrap();
        let err = uncompress_framed(codec.as_ref(), &framed, data.len() - 1).unwrap_err();
        let err = err.downcast::<CodecError>().unwrap();
        assert!(
            matches!(err, CodecError::CapacityExceeded { .. }),
            "{}: {err}",
            codec.name()
        );
    }
}

#[test]
fn test_truncated_prefix_is_malformed_varint() {
    for codec in bundled_codecs() {
        let mut out = [0u8; 16];
        let err = codec
            .uncompress(&mut RegionReader::new(&[0x80, 0x80]), &mut RegionWriter::new(&mut out))
            .unwrap_err();
        assert!(matches!(err, CodecError::MalformedVarint(_)), "{}", codec.name());
    }
}

#[test]
fn test_prefix_mismatch_is_corruption() {
    let data = compressible_bytes(200);
    for codec in bundled_codecs() {
        let mut framed = compress_framed(codec.as_ref(), &data).unwrap();
        // 200 encodes as [0xC8, 0x01]; claim 201 instead
        assert_eq!(&framed[..2], &[0xC8, 0x01]);
        framed[0] = 0xC9;
        let err = uncompress_framed(codec.as_ref(), &framed, 1024).unwrap_err();
        let err = err.downcast::<CodecError>().unwrap();
        assert!(
            matches!(err, CodecError::CorruptPayload { .. }),
            "{}: {err}",
            codec.name()
        );
    }
}

#[test]
fn test_compress_span_frames_only_the_span() -> anyhow::Result<()> {
    let data = compressible_bytes(1000);
    let codec = Lz4Codec;
    let mut out = vec![0u8; codec.max_compressed_length(400)];
    let n = codec.compress_span(&data, 300, 400, &mut RegionWriter::new(&mut out))?;
    let restored = uncompress_framed(&codec, &out[..n], 400)?;
    assert_eq!(restored.as_slice(), &data[300..700]);
    Ok(())
}

#[test]
fn test_shared_codec_across_threads_matches_sequential() {
    const THREADS: usize = 8;
    let inputs: Vec<Vec<u8>> = (0..THREADS)
        .map(|i| {
            let mut block = compressible_bytes(16 * 1024);
            block.extend(pseudo_random_bytes(512, i as u64));
            block
        })
        .collect();

    for codec in bundled_codecs() {
        let sequential: Vec<Vec<u8>> = inputs
            .iter()
            .map(|input| compress_framed(codec.as_ref(), input).unwrap())
            .collect();

        let concurrent: Vec<Vec<u8>> = thread::scope(|s| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|input| {
                    let codec = Arc::clone(&codec);
                    s.spawn(move || {
                        let framed = compress_framed(codec.as_ref(), input).unwrap();
                        let restored = uncompress_framed(codec.as_ref(), &framed, input.len()).unwrap();
                        assert_eq!(&restored, input);
                        framed
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(concurrent, sequential, "{} concurrent output", codec.name());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn framed_and_raw_round_trip(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        for codec in bundled_codecs() {
            let framed = compress_framed(codec.as_ref(), &data).unwrap();
            let restored = uncompress_framed(codec.as_ref(), &framed, data.len()).unwrap();
            prop_assert_eq!(&restored, &data);

            let payload = compress_payload(codec.as_ref(), &data).unwrap();
            let mut out = vec![0u8; data.len()];
            let n = codec.uncompress_span(&payload, 0, payload.len(), &mut out, 0).unwrap();
            prop_assert_eq!(n, data.len());
            prop_assert_eq!(&out, &data);
        }
    }
}
