//! The file preamble identifying match-table kind and parameters.

use std::io::{Read, Write};

use crate::error::{Result, TmfError};
use crate::number_codec::{read_be, write_be};

/// Which kind of match-table file a [`Header`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// Holds only the essential (minimal) subset of matches.
    Essential,
    /// Holds the full, interpolated set of matches.
    Interpolated,
}

impl HeaderKind {
    fn magic(self) -> u64 {
        match self {
            HeaderKind::Essential => Header::ESSENTIAL_MAGIC,
            HeaderKind::Interpolated => Header::INTERPOLATED_MAGIC,
        }
    }
}

/// File preamble: which kind of match table this is, the size of the input
/// it was computed over, and the `[min_match, max_match]` length range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub kind: HeaderKind,
    pub input_size: u32,
    pub min_match: u16,
    pub max_match: u16,
}

impl Header {
    /// Size of a [`Header`] in its on-disk form.
    pub const SIZE_ON_DISK: usize = 8 + 4 + 2 + 2;

    pub const ESSENTIAL_MAGIC: u64 = 3_463_562_352_346_342_432;
    pub const INTERPOLATED_MAGIC: u64 = 3_765_472_453_426_534_653;

    pub fn for_essential_matches(input_size: u32, min_match: u16, max_match: u16) -> Self {
        Header { kind: HeaderKind::Essential, input_size, min_match, max_match }
    }

    pub fn for_interpolated_matches(input_size: u32, min_match: u16, max_match: u16) -> Self {
        Header { kind: HeaderKind::Interpolated, input_size, min_match, max_match }
    }

    pub fn is_for_essential_matches(&self) -> bool {
        self.kind == HeaderKind::Essential
    }

    pub fn is_for_interpolated_matches(&self) -> bool {
        self.kind == HeaderKind::Interpolated
    }

    /// Validates `0 ≤ input_size < 2³¹` and `1 ≤ min_match ≤ max_match ≤ 120`.
    pub fn validate(&self) -> Result<()> {
        if self.input_size >= (1u32 << 31) {
            return Err(TmfError::ValidationFailed(format!(
                "input_size {} exceeds 2^31", self.input_size
            )));
        }
        if !(1 <= self.min_match && self.min_match <= self.max_match && self.max_match <= 120) {
            return Err(TmfError::ValidationFailed(format!(
                "min_match {} / max_match {} out of range", self.min_match, self.max_match
            )));
        }
        Ok(())
    }

    /// Reads a 16-byte header, verifying the magic is one of the two
    /// recognised values.
    pub fn read_from(reader: &mut impl Read) -> Result<Self> {
        let magic = read_be(reader, 8)?;
        let input_size = read_be(reader, 4)? as u32;
        let min_match = read_be(reader, 2)? as u16;
        let max_match = read_be(reader, 2)? as u16;
        let kind = if magic == Header::ESSENTIAL_MAGIC {
            HeaderKind::Essential
        } else if magic == Header::INTERPOLATED_MAGIC {
            HeaderKind::Interpolated
        } else {
            return Err(TmfError::CorruptFile(format!("unrecognised header magic {magic}")));
        };
        Ok(Header { kind, input_size, min_match, max_match })
    }

    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        write_be(self.kind.magic(), writer, 8)?;
        write_be(self.input_size as u64, writer, 4)?;
        write_be(self.min_match as u64, writer, 2)?;
        write_be(self.max_match as u64, writer, 2)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trip_essential_header() {
        let h = Header::for_essential_matches(1000, 3, 8);
        let mut buf = Vec::new();
        h.write_to(&mut buf).unwrap();
        assert_eq!(buf.len(), Header::SIZE_ON_DISK);
        let mut cursor = Cursor::new(buf);
        let read_back = Header::read_from(&mut cursor).unwrap();
        assert_eq!(read_back, h);
        assert!(read_back.is_for_essential_matches());
    }

    #[test]
    fn round_trip_interpolated_header() {
        let h = Header::for_interpolated_matches(0, 1, 1);
        let mut buf = Vec::new();
        h.write_to(&mut buf).unwrap();
        let mut cursor = Cursor::new(buf);
        let read_back = Header::read_from(&mut cursor).unwrap();
        assert!(read_back.is_for_interpolated_matches());
    }

    #[test]
    fn unrecognised_magic_is_corrupt_file() {
        let mut buf = Vec::new();
        crate::number_codec::write_be(0, &mut buf, 8).unwrap();
        crate::number_codec::write_be(0, &mut buf, 4).unwrap();
        crate::number_codec::write_be(1, &mut buf, 2).unwrap();
        crate::number_codec::write_be(1, &mut buf, 2).unwrap();
        let mut cursor = Cursor::new(buf);
        let err = Header::read_from(&mut cursor).unwrap_err();
        assert!(matches!(err, TmfError::CorruptFile(_)));
    }

    #[test]
    fn validate_rejects_min_greater_than_max() {
        let h = Header::for_essential_matches(0, 5, 3);
        assert!(h.validate().is_err());
    }

    #[test]
    fn validate_rejects_max_above_120() {
        let h = Header::for_essential_matches(0, 1, 121);
        assert!(h.validate().is_err());
    }

    #[test]
    fn validate_accepts_min_equals_max_equals_one() {
        let h = Header::for_essential_matches(0, 1, 1);
        assert!(h.validate().is_ok());
    }

    #[test]
    fn validate_accepts_max_equals_120() {
        let h = Header::for_essential_matches(0, 1, 120);
        assert!(h.validate().is_ok());
    }

    #[test]
    fn magic_numbers_match_spec() {
        assert_eq!(Header::ESSENTIAL_MAGIC, 3_463_562_352_346_342_432);
        assert_eq!(Header::INTERPOLATED_MAGIC, 3_765_472_453_426_534_653);
    }
}
