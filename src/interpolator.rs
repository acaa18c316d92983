//! Reconstruction of the full optimal-match set from an essential-matches
//! file.
//!
//! At each position the essential matches named for it are unrolled into the
//! offsets they cover, merged with what was inherited from the previous
//! position (preferring the smaller offset at overlapping lengths), and the
//! merged set is both written out and carried forward as next position's
//! inherited state.

use std::io::{Cursor, Write};

use crate::error::{Result, TmfError};
use crate::header::Header;
use crate::progress::ProgressReporter;
use crate::record::Match;

/// Reads an essential-matches file (`essential_bytes`, header included) and
/// writes the corresponding interpolated-matches file to `interpolated_writer`.
pub fn interpolate(
    essential_bytes: &[u8],
    interpolated_writer: &mut impl Write,
    progress_period: Option<u64>,
) -> Result<()> {
    let mut reader = Cursor::new(essential_bytes);
    let header = Header::read_from(&mut reader)?;
    header.validate()?;
    if !header.is_for_essential_matches() {
        return Err(TmfError::CorruptFile(
            "expected an essential-matches header, found an interpolated-matches one".into(),
        ));
    }
    let input_size = header.input_size;
    let min_match = header.min_match as u32;
    let max_match = header.max_match as u32;

    let payload_len = essential_bytes.len() - Header::SIZE_ON_DISK;
    if payload_len % Match::SIZE_ON_DISK != 0 {
        return Err(TmfError::CorruptFile(
            "essential-matches payload is not a whole number of match records".into(),
        ));
    }
    let essential_matches_count = payload_len / Match::SIZE_ON_DISK;
    let mut essential_matches = Vec::with_capacity(essential_matches_count);
    for _ in 0..essential_matches_count {
        let m = Match::read_from(&mut reader)?;
        m.validate(min_match, max_match)?;
        essential_matches.push(m);
    }

    let interpolated_header = Header::for_interpolated_matches(input_size, header.min_match, header.max_match);
    interpolated_header.validate()?;
    interpolated_header.write_to(interpolated_writer)?;

    let mut progress = ProgressReporter::new(progress_period);
    let mut inherited_offsets = vec![0u32; max_match as usize + 1];
    let mut current_offsets = vec![0u32; max_match as usize + 1];
    let mut inherited_max_match: u32 = 0;
    let mut next_essential_index = 0usize;

    for position in 0..input_size {
        let mut current_max_match: u32 = 0;

        let matches_start = next_essential_index;
        while next_essential_index < essential_matches.len()
            && essential_matches[next_essential_index].position == position
        {
            next_essential_index += 1;
        }
        let current_essential_matches = &essential_matches[matches_start..next_essential_index];

        for pair in current_essential_matches.windows(2) {
            let (shorter, longer) = (&pair[0], &pair[1]);
            if !(shorter.length < longer.length && shorter.offset < longer.offset) {
                return Err(TmfError::CorruptFile(
                    "essential matches for a position must strictly increase in length and offset".into(),
                ));
            }
        }

        let mut next_match_length = min_match;
        for essential_match in current_essential_matches {
            let offset = position - essential_match.source();
            let strictly_improves_on_inherited = essential_match.length > inherited_max_match
                || offset < inherited_offsets[essential_match.length as usize];
            if !strictly_improves_on_inherited {
                return Err(TmfError::CorruptFile(
                    "essential match must have a smaller offset than the inherited match it overrides".into(),
                ));
            }
            while next_match_length <= essential_match.length {
                current_offsets[next_match_length as usize] = offset;
                current_max_match = next_match_length;
                next_match_length += 1;
            }
        }

        for match_length in min_match..=inherited_max_match {
            if match_length <= current_max_match {
                current_offsets[match_length as usize] =
                    current_offsets[match_length as usize].min(inherited_offsets[match_length as usize]);
            } else {
                current_offsets[match_length as usize] = inherited_offsets[match_length as usize];
                current_max_match = match_length;
            }
        }

        for match_length in min_match..=current_max_match {
            let interpolated_match = Match::new(position, match_length, current_offsets[match_length as usize]);
            interpolated_match.validate(min_match, max_match)?;
            interpolated_match.write_to(interpolated_writer)?;
        }

        for inherited_length in 1..current_max_match {
            inherited_offsets[inherited_length as usize] = current_offsets[inherited_length as usize + 1];
        }
        inherited_max_match = current_max_match.saturating_sub(1);

        progress.tick(position as u64 + 1);
    }
    progress.done();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::essential_extractor::find_all_essential_matches;
    use crate::match_finder::FinderKind;
    use crate::verifier::verify;
    use std::io::Cursor as ReadCursor;

    fn essential_for(input: &[u8], min_match: u16, max_match: u16) -> Vec<u8> {
        let mut out = Vec::new();
        find_all_essential_matches(FinderKind::BruteForce, min_match, max_match, input, &mut out, None).unwrap();
        out
    }

    #[test]
    fn interpolated_header_has_the_right_magic_and_bounds() {
        let essential = essential_for(b"abcabc", 2, 4);
        let mut interpolated = Vec::new();
        interpolate(&essential, &mut interpolated, None).unwrap();
        let mut reader = ReadCursor::new(&interpolated[..]);
        let header = Header::read_from(&mut reader).unwrap();
        assert!(header.is_for_interpolated_matches());
        assert_eq!(header.input_size, 6);
    }

    #[test]
    fn interpolated_matches_verify_against_both_finders() {
        for finder in [FinderKind::BruteForce, FinderKind::Hashed] {
            let input: &[u8] = b"abcabcabcxabcabcabc";
            let essential = essential_for(input, 3, 6);
            let mut interpolated = Vec::new();
            interpolate(&essential, &mut interpolated, None).unwrap();
            let matches_read = verify(finder, input, &interpolated, None).unwrap();
            assert!(matches_read > 0);
        }
    }

    #[test]
    fn rejects_an_interpolated_header_passed_as_essential() {
        let essential = essential_for(b"abcabc", 2, 4);
        let mut interpolated = Vec::new();
        interpolate(&essential, &mut interpolated, None).unwrap();
        // feed the interpolated file back in as if it were essential
        let err = interpolate(&interpolated, &mut Vec::new(), None).unwrap_err();
        assert!(matches!(err, TmfError::CorruptFile(_)));
    }

    #[test]
    fn single_byte_input_has_no_matches_to_interpolate() {
        let essential = essential_for(b"x", 1, 5);
        let mut interpolated = Vec::new();
        interpolate(&essential, &mut interpolated, None).unwrap();
        assert_eq!(interpolated.len(), Header::SIZE_ON_DISK);
    }
}
