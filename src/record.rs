//! The [`Match`] record: a (position, length, offset) triple with validation,
//! total ordering, and a fixed 16-byte binary form.

use std::io::{Read, Write};

use crate::error::{Result, TmfError};
use crate::number_codec::{read_be, write_be};

/// One optimal back-reference: bytes `[source, source+length)` equal bytes
/// `[position, position+length)`, where `source = position - offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub position: u32,
    pub length: u32,
    pub offset: u32,
}

impl Match {
    /// Size of a [`Match`] in its on-disk form.
    pub const SIZE_ON_DISK: usize = 4 * 4;

    pub fn new(position: u32, length: u32, offset: u32) -> Self {
        Match { position, length, offset }
    }

    /// Constructs a match from an explicit source position instead of an
    /// offset.
    pub fn from_position_length_source(position: u32, length: u32, source: u32) -> Self {
        Match { position, length, offset: position - source }
    }

    /// The absolute position the match refers back to.
    pub fn source(&self) -> u32 {
        self.position - self.offset
    }

    /// Validates `1 ≤ offset ≤ position` and
    /// `min_match ≤ length ≤ max_match ≤ 120`.
    pub fn validate(&self, min_match: u32, max_match: u32) -> Result<()> {
        if !(1 <= self.offset && self.offset <= self.position) {
            return Err(TmfError::ValidationFailed(format!(
                "match offset {} out of range for position {}",
                self.offset, self.position
            )));
        }
        if !(1 <= min_match && min_match <= self.length && self.length <= max_match && max_match <= 120) {
            return Err(TmfError::ValidationFailed(format!(
                "match length {} out of range [{min_match}, {max_match}] (cap 120)",
                self.length
            )));
        }
        Ok(())
    }

    /// Reads a 16-byte match record: `position | length | offset | 0`. The
    /// trailing zero pad must be exactly zero, or [`TmfError::CorruptFile`]
    /// is returned.
    pub fn read_from(reader: &mut impl Read) -> Result<Self> {
        let position = read_be(reader, 4)? as u32;
        let length = read_be(reader, 4)? as u32;
        let offset = read_be(reader, 4)? as u32;
        let pad = read_be(reader, 4)?;
        if pad != 0 {
            return Err(TmfError::CorruptFile(format!(
                "match record pad must be zero, got {pad}"
            )));
        }
        Ok(Match { position, length, offset })
    }

    /// Writes this match as a 16-byte record.
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        write_be(self.position as u64, writer, 4)?;
        write_be(self.length as u64, writer, 4)?;
        write_be(self.offset as u64, writer, 4)?;
        write_be(0, writer, 4)?;
        Ok(())
    }

    /// Longest common prefix of `input[source_pos..]` and `input[target_pos..]`,
    /// capped at `max_match`.
    pub fn compute_match_length(
        input: &[u8],
        source_pos: usize,
        target_pos: usize,
        max_match: u32,
    ) -> u32 {
        let input_len = input.len();
        let mut match_length: u32 = 0;
        while source_pos + match_length as usize < input_len
            && target_pos + match_length as usize < input_len
            && input[source_pos + match_length as usize] == input[target_pos + match_length as usize]
            && match_length < max_match
        {
            match_length += 1;
        }
        match_length
    }
}

impl PartialOrd for Match {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Match {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.position, self.length, self.offset).cmp(&(other.position, other.length, other.offset))
    }
}
