//! Little-endian base-128 varints used as frame length prefixes.
//!
//! Each byte carries 7 value bits, least-significant group first. Every byte
//! except the last has its high bit (`0x80`) set. A `u32` needs at most
//! [`MAX_VARINT_LEN`] bytes.

use std::io::{self, Read, Write};

use crate::error::{CodecError, Result};

/// Longest encoding of a `u32`.
pub const MAX_VARINT_LEN: usize = 5;

const CONTINUATION: u8 = 0x80;
const VALUE_MASK: u8 = 0x7F;

/// Number of bytes [`encode`] emits for `value`.
pub const fn encoded_len(value: u32) -> usize {
    if value < 1 << 7 {
        1
    } else if value < 1 << 14 {
        2
    } else if value < 1 << 21 {
        3
    } else if value < 1 << 28 {
        4
    } else {
        5
    }
}

/// Encode `value` with the minimal number of 7-bit groups.
///
/// Returns the scratch array and the number of leading bytes in use.
pub fn encode(value: u32) -> ([u8; MAX_VARINT_LEN], usize) {
    let mut out = [0u8; MAX_VARINT_LEN];
    let len = encoded_len(value);
    for (i, slot) in out.iter_mut().enumerate().take(len) {
        let group = (value >> (7 * i)) as u8 & VALUE_MASK;
        *slot = if i + 1 < len { group | CONTINUATION } else { group };
    }
    (out, len)
}

/// Write `value` to `writer`, returning the number of bytes emitted.
pub fn write_varint<W: Write + ?Sized>(writer: &mut W, value: u32) -> io::Result<usize> {
    let (bytes, len) = encode(value);
    writer.write_all(&bytes[..len])?;
    Ok(len)
}

/// Append the encoding of `value` to `out`.
pub fn encode_varint_to_vec(value: u32, out: &mut Vec<u8>) {
    let (bytes, len) = encode(value);
    out.extend_from_slice(&bytes[..len]);
}

/// Read one varint from `reader`, a byte at a time.
///
/// Fails with [`CodecError::MalformedVarint`] when the reader runs dry
/// before a terminating byte, or when the value does not fit in 32 bits.
pub fn read_varint<R: Read + ?Sized>(reader: &mut R) -> Result<u32> {
    let mut value = 0u32;
    for i in 0..MAX_VARINT_LEN {
        let byte = next_byte(reader)?;
        value |= accumulate(byte, i)?;
        if byte & CONTINUATION == 0 {
            return Ok(value);
        }
    }
    Err(CodecError::MalformedVarint("more than five bytes"))
}

/// Decode one varint from the front of `bytes`, returning the value and the
/// unread remainder.
pub fn decode_varint(bytes: &[u8]) -> Result<(u32, &[u8])> {
    let mut value = 0u32;
    for (i, &byte) in bytes.iter().enumerate().take(MAX_VARINT_LEN) {
        value |= accumulate(byte, i)?;
        if byte & CONTINUATION == 0 {
            return Ok((value, &bytes[i + 1..]));
        }
    }
    if bytes.len() < MAX_VARINT_LEN {
        Err(CodecError::MalformedVarint("truncated before terminating byte"))
    } else {
        Err(CodecError::MalformedVarint("more than five bytes"))
    }
}

fn next_byte<R: Read + ?Sized>(reader: &mut R) -> Result<u8> {
    let mut byte = [0u8; 1];
    loop {
        match reader.read(&mut byte) {
            Ok(0) => return Err(CodecError::MalformedVarint("truncated before terminating byte")),
            Ok(_) => return Ok(byte[0]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => return Err(CodecError::MalformedVarint("unreadable length prefix")),
        }
    }
}

fn accumulate(byte: u8, index: usize) -> Result<u32> {
    let group = u32::from(byte & VALUE_MASK);
    // the fifth group only has room for the top four bits of a u32
    if index == MAX_VARINT_LEN - 1 && group > 0x0F {
        return Err(CodecError::MalformedVarint("value overflows 32 bits"));
    }
    Ok(group << (7 * index))
}
