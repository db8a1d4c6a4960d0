// I/O utilities for reading OGG files

use std::io::{ErrorKind, Read};

/// Read little-endian 32-bit integer
pub fn read_le_u32<R: Read>(reader: &mut R) -> std::io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

/// Fill `buf` as far as the reader allows.
///
/// Unlike `read_exact`, running out of input is not an error: the number of
/// bytes actually read is returned so callers can tell a clean end of input
/// (0) from a truncated record.
pub fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
