//! Big-endian fixed-width integer read/write on a byte stream.
//!
//! Loops byte-by-byte regardless of width rather than special-casing widths
//! 2/4/8 with native integer reads, since `width` here ranges only over 2, 4,
//! and 8 and a byte loop keeps the read/write symmetric and trivially correct.

use std::io::{Read, Write};

use crate::error::{Result, TmfError};

/// Reads exactly `width` bytes from `reader` and composes them
/// most-significant-byte first into a `u64`.
///
/// Fails with [`TmfError::ShortRead`] if the stream ends before `width` bytes
/// arrive. `width` must be at most 8 (the only widths used in this crate are
/// 2, 4, and 8).
pub fn read_be(reader: &mut impl Read, width: usize) -> Result<u64> {
    debug_assert!(width <= 8);
    let mut buf = [0u8; 8];
    reader
        .read_exact(&mut buf[..width])
        .map_err(|_| TmfError::ShortRead)?;
    let mut value: u64 = 0;
    for &byte in &buf[..width] {
        value = (value << 8) | byte as u64;
    }
    Ok(value)
}

/// Writes `width` bytes of `value` to `writer`, most-significant-byte first,
/// silently truncating to the low `width` bytes (the caller guarantees
/// `value` fits).
pub fn write_be(value: u64, writer: &mut impl Write, width: usize) -> Result<()> {
    debug_assert!(width <= 8);
    let mut buf = [0u8; 8];
    for (i, slot) in buf[..width].iter_mut().enumerate() {
        let shift = 8 * (width - 1 - i);
        *slot = (value >> shift) as u8;
    }
    writer.write_all(&buf[..width]).map_err(|_| TmfError::ShortWrite)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trip_widths() {
        for width in [2usize, 4, 8] {
            let max = if width == 8 { u64::MAX } else { (1u64 << (8 * width)) - 1 };
            for value in [0u64, 1, 255, max / 2, max] {
                let mut buf = Vec::new();
                write_be(value, &mut buf, width).unwrap();
                assert_eq!(buf.len(), width);
                let mut cursor = Cursor::new(buf);
                let read_back = read_be(&mut cursor, width).unwrap();
                assert_eq!(read_back, value);
            }
        }
    }

    #[test]
    fn write_be_is_big_endian() {
        let mut buf = Vec::new();
        write_be(0x0102_0304, &mut buf, 4).unwrap();
        assert_eq!(buf, vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn write_be_truncates_silently() {
        let mut buf = Vec::new();
        write_be(0x1_0000, &mut buf, 2).unwrap();
        assert_eq!(buf, vec![0x00, 0x00]);
    }

    #[test]
    fn short_read_on_truncated_stream() {
        let mut cursor = Cursor::new(vec![0x01u8, 0x02]);
        let err = read_be(&mut cursor, 4).unwrap_err();
        assert_eq!(err, TmfError::ShortRead);
    }

    #[test]
    fn short_read_on_empty_stream() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        let err = read_be(&mut cursor, 2).unwrap_err();
        assert_eq!(err, TmfError::ShortRead);
    }
}
