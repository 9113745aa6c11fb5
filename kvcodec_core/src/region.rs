//! Byte-stream adapters over caller-owned, fixed-capacity memory windows.
//!
//! A region is a `(buffer, offset, len)` window. Readers report end-of-data
//! once the window is exhausted; writers refuse any write that would cross
//! the window boundary instead of truncating or growing. Both implement the
//! `std::io` traits so streaming encoders and decoders can be pumped straight
//! into caller memory.

use std::io::{self, Read, Write};

use crate::error::{CodecError, Result};

fn window_bounds(offset: usize, len: usize, available: usize) -> Result<std::ops::Range<usize>> {
    match offset.checked_add(len) {
        Some(end) if end <= available => Ok(offset..end),
        _ => Err(CodecError::OutOfBounds {
            offset,
            len,
            available,
        }),
    }
}

/// Read cursor over a borrowed, bounded byte window.
#[derive(Debug, Clone)]
pub struct RegionReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> RegionReader<'a> {
    /// View the whole of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// View `buf[offset..offset + len]`.
    pub fn with_bounds(buf: &'a [u8], offset: usize, len: usize) -> Result<Self> {
        let range = window_bounds(offset, len, buf.len())?;
        Ok(Self::new(&buf[range]))
    }

    /// Size of the window.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left before end-of-data.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The unread part of the window.
    pub fn remaining_slice(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// Next byte, or `None` once the window is exhausted.
    pub fn read_byte(&mut self) -> Option<u8> {
        let byte = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    /// Copy up to `out.len()` bytes, never more than remain.
    ///
    /// Returns `None` only when no bytes remain at all.
    pub fn read_into(&mut self, out: &mut [u8]) -> Option<usize> {
        let remaining = self.remaining_slice();
        if remaining.is_empty() {
            return None;
        }
        let n = out.len().min(remaining.len());
        out[..n].copy_from_slice(&remaining[..n]);
        self.pos += n;
        Some(n)
    }

    /// Mark `n` bytes as consumed, clamped to the end of the window.
    pub fn consume(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.buf.len());
    }
}

impl Read for RegionReader<'_> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        Ok(self.read_into(out).unwrap_or(0))
    }
}

/// Write cursor over a borrowed, fixed-capacity byte window.
///
/// Bytes outside `[0, position)` are never touched, and a write that does not
/// fit entirely fails with [`CodecError::CapacityExceeded`] without writing
/// anything.
#[derive(Debug)]
pub struct RegionWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> RegionWriter<'a> {
    /// Write into the whole of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Write into `buf[offset..offset + len]`.
    pub fn with_bounds(buf: &'a mut [u8], offset: usize, len: usize) -> Result<Self> {
        let range = window_bounds(offset, len, buf.len())?;
        Ok(Self::new(&mut buf[range]))
    }

    /// Write into `buf[offset..]`.
    pub fn from_offset(buf: &'a mut [u8], offset: usize) -> Result<Self> {
        let len = buf.len().saturating_sub(offset);
        Self::with_bounds(buf, offset, len)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes written so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// The bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// The part of the window not yet written, for codecs that encode in place.
    ///
    /// Pair with [`RegionWriter::advance`] once the bytes are filled in.
    pub fn unfilled_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.pos..]
    }

    /// Commit `n` bytes previously filled through [`RegionWriter::unfilled_mut`].
    pub fn advance(&mut self, n: usize) -> Result<()> {
        self.reserve(n)?;
        self.pos += n;
        Ok(())
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.reserve(1)?;
        self.buf[self.pos] = byte;
        self.pos += 1;
        Ok(())
    }

    pub fn write_slice(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    fn reserve(&self, n: usize) -> Result<()> {
        if n > self.remaining() {
            return Err(CodecError::CapacityExceeded {
                required: self.pos.saturating_add(n),
                capacity: self.buf.len(),
            });
        }
        Ok(())
    }
}

impl Write for RegionWriter<'_> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.write_slice(bytes)?;
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
