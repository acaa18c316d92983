//! Extraction of the essential (minimal) match set from a full optimal-match
//! scan.
//!
//! A match at `(position, length)` is essential unless it is either inherited
//! unchanged from the previous position (same offset one length shorter, at
//! the previous position) or subsumed by a longer match at the same position
//! sharing its offset.

use std::io::Write;

use crate::error::Result;
use crate::header::Header;
use crate::match_finder::{FinderKind, MatchFinder};
use crate::progress::ProgressReporter;
use crate::record::Match;

/// Scans `input` with the named finder and writes the essential-matches file
/// (header followed by essential [`Match`] records) to `essential_writer`.
pub fn find_all_essential_matches(
    finder_kind: FinderKind,
    min_match: u16,
    max_match: u16,
    input: &[u8],
    essential_writer: &mut impl Write,
    progress_period: Option<u64>,
) -> Result<()> {
    let header = Header::for_essential_matches(input.len() as u32, min_match, max_match);
    header.validate()?;
    header.write_to(essential_writer)?;

    let min_match = min_match as u32;
    let max_match = max_match as u32;
    let mut finder: Box<dyn MatchFinder> = finder_kind.build(input, min_match, max_match);

    let mut inherited_offsets = vec![0u32; max_match as usize + 1];
    let mut current_offsets = vec![0u32; max_match as usize + 1];
    let mut inherited_max_match: u32 = 0;
    let mut progress = ProgressReporter::new(progress_period);

    for position in 0..input.len() as u32 {
        let current_max_match = finder.collect_next(&mut current_offsets);

        for length in min_match..=current_max_match {
            let current_is_inherited = length <= inherited_max_match
                && inherited_offsets[length as usize] == current_offsets[length as usize];
            let longer_has_same_offset = length < current_max_match
                && current_offsets[length as usize] == current_offsets[length as usize + 1];
            if !current_is_inherited && !longer_has_same_offset {
                let essential_match = Match::new(position, length, current_offsets[length as usize]);
                essential_match.validate(min_match, max_match)?;
                essential_match.write_to(essential_writer)?;
            }
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
    use crate::interpolator::interpolate;
    use crate::record::Match as MatchRecord;
    use std::io::Cursor;

    fn extract(input: &[u8], min_match: u16, max_match: u16, finder: FinderKind) -> Vec<u8> {
        let mut out = Vec::new();
        find_all_essential_matches(finder, min_match, max_match, input, &mut out, None).unwrap();
        out
    }

    fn read_matches(bytes: &[u8]) -> Vec<MatchRecord> {
        let mut cursor = Cursor::new(&bytes[Header::SIZE_ON_DISK..]);
        let count = (bytes.len() - Header::SIZE_ON_DISK) / MatchRecord::SIZE_ON_DISK;
        (0..count).map(|_| MatchRecord::read_from(&mut cursor).unwrap()).collect()
    }

    #[test]
    fn header_carries_input_size_and_bounds() {
        let out = extract(b"abcabc", 2, 4, FinderKind::BruteForce);
        let mut cursor = Cursor::new(&out[..]);
        let header = Header::read_from(&mut cursor).unwrap();
        assert!(header.is_for_essential_matches());
        assert_eq!(header.input_size, 6);
        assert_eq!(header.min_match, 2);
        assert_eq!(header.max_match, 4);
    }

    #[test]
    fn essential_matches_omit_inherited_and_subsumed_entries() {
        // "aaaa" with min=1 max=3: at position 1, three bytes remain, so
        // offset 1 already extends the full length-3 match — lengths 1 and 2
        // are subsumed by it at that same position, so only (1,3,1) is
        // essential there. At position 2 the length-2 match and at position 3
        // the length-1 match are both inherited unchanged (same offset one
        // length shorter than the previous position), so nothing new survives
        // after position 1.
        let out = extract(b"aaaa", 1, 3, FinderKind::BruteForce);
        let matches = read_matches(&out);
        assert_eq!(matches, vec![MatchRecord::new(1, 3, 1)]);
    }

    #[test]
    fn essential_matches_interpolate_back_to_the_full_set() {
        let both_finders = [FinderKind::BruteForce, FinderKind::Hashed];
        for finder in both_finders {
            let essential = extract(b"abcabcabcxabcabc", 3, 6, finder);
            let mut interpolated = Vec::new();
            interpolate(&essential, &mut interpolated, None).unwrap();
            assert!(interpolated.len() >= Header::SIZE_ON_DISK);
        }
    }

    #[test]
    fn no_essential_matches_for_input_with_no_repeats() {
        let out = extract(b"abcdefgh", 3, 5, FinderKind::BruteForce);
        let matches = read_matches(&out);
        assert!(matches.is_empty());
    }
}
