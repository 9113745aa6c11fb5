use crate::error::Result;
use crate::frame;
use crate::region::{RegionReader, RegionWriter};

/// Core compression abstraction.
///
/// Each `Codec` implementation:
/// - Is identified by a stable numeric `id()` the storage engine keeps next to
///   every block it writes.
/// - Holds only immutable configuration. Every call runs a fresh streaming
///   session over its own adapters, so one value can serve any number of
///   threads without locking.
/// - Never reads or writes outside the regions it is handed and keeps no
///   reference to them once the call returns.
///
/// Implementors supply the payload transform (`compress_raw` /
/// `uncompress_raw`); the length-prefixed frame handling is shared.
///
/// Two framings exist and must not be mixed: [`Codec::compress`] and
/// [`Codec::uncompress`] always carry a varint length prefix, while
/// [`Codec::compress_raw`], [`Codec::uncompress_raw`] and
/// [`Codec::uncompress_span`] work on the bare payload.
pub trait Codec: Send + Sync {
    /// Stable codec ID.
    fn id(&self) -> u8;

    /// Human-readable codec name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether this codec can run in the current process.
    ///
    /// Lets higher layers feature-detect between registered codecs instead of
    /// failing at call time.
    fn available(&self) -> bool {
        true
    }

    /// Upper bound on the framed output of [`Codec::compress`] for `len`
    /// input bytes, prefix included.
    ///
    /// Block-copy codecs return a tight bound. Streaming codecs return a
    /// looser one that holds at every compression level, so a region of this
    /// size never fails with
    /// [`CodecError::CapacityExceeded`](crate::CodecError::CapacityExceeded).
    fn max_compressed_length(&self, len: usize) -> usize;

    /// Compress `input` into `dest` without a length prefix.
    ///
    /// Returns the number of payload bytes written.
    fn compress_raw(&self, input: &[u8], dest: &mut RegionWriter<'_>) -> Result<usize>;

    /// Decompress the payload remaining in `src` into `dest`.
    ///
    /// Returns the number of bytes written to `dest`.
    fn uncompress_raw(&self, src: &mut RegionReader<'_>, dest: &mut RegionWriter<'_>) -> Result<usize>;

    /// Write a complete frame: varint of `input.len()`, then the payload.
    ///
    /// Returns prefix + payload bytes written.
    fn compress(&self, input: &[u8], dest: &mut RegionWriter<'_>) -> Result<usize> {
        let header = frame::write_header(input.len(), dest)?;
        let payload = self.compress_raw(input, dest)?;
        tracing::trace!(
            codec = self.name(),
            raw_len = input.len(),
            framed_len = header + payload,
            "compressed frame"
        );
        Ok(header + payload)
    }

    /// [`Codec::compress`] over `input[offset..offset + len]`.
    fn compress_span(
        &self,
        input: &[u8],
        offset: usize,
        len: usize,
        dest: &mut RegionWriter<'_>,
    ) -> Result<usize> {
        let span = RegionReader::with_bounds(input, offset, len)?;
        self.compress(span.remaining_slice(), dest)
    }

    /// Decode a complete frame from `src` into `dest`.
    ///
    /// The prefix is read and checked against the decoded length; a mismatch
    /// is reported as corruption.
    fn uncompress(&self, src: &mut RegionReader<'_>, dest: &mut RegionWriter<'_>) -> Result<usize> {
        let expected = frame::read_header(src)?;
        let produced = self.uncompress_raw(src, dest)?;
        frame::verify_length(self.name(), expected, produced)?;
        tracing::trace!(codec = self.name(), raw_len = produced, "uncompressed frame");
        Ok(produced)
    }

    /// Decompress the bare payload `input[offset..offset + len]` into
    /// `output[output_offset..]`.
    ///
    /// No length prefix is read: the caller already knows the decompressed
    /// size from its own block metadata.
    fn uncompress_span(
        &self,
        input: &[u8],
        offset: usize,
        len: usize,
        output: &mut [u8],
        output_offset: usize,
    ) -> Result<usize> {
        let mut src = RegionReader::with_bounds(input, offset, len)?;
        let mut dest = RegionWriter::from_offset(output, output_offset)?;
        self.uncompress_raw(&mut src, &mut dest)
    }

    /// Frame a small text payload into a fresh vector.
    fn compress_text(&self, text: &str) -> Result<Vec<u8>> {
        let input = text.as_bytes();
        let mut out = vec![0u8; self.max_compressed_length(input.len())];
        let written = self.compress(input, &mut RegionWriter::new(&mut out))?;
        out.truncate(written);
        Ok(out)
    }
}
