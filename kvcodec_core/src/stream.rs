use std::io::{self, Read, Write};

/// Size of the intermediate buffer used by [`copy`].
pub const COPY_BUFFER_SIZE: usize = 1024;

/// Pump every byte `reader` yields into `writer` through a small stack buffer.
///
/// Returns the number of bytes transferred. Writer failures (typically a
/// full destination region) abort the copy and are returned as-is; bytes
/// already written stay written.
pub fn copy<R, W>(reader: &mut R, writer: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut count = 0u64;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => return Ok(count),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        writer.write_all(&buffer[..read])?;
        count += read as u64;
    }
}
