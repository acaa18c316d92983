//! Cross-checking an interpolated-matches file against a fresh match-finder
//! scan of the original input.

use std::io::Cursor;

use crate::error::{Result, TmfError};
use crate::header::Header;
use crate::match_finder::{FinderKind, MatchFinder};
use crate::progress::{report_verification_ok, ProgressReporter};
use crate::record::Match;

/// Re-scans `input` with the named finder and checks that `interpolated_bytes`
/// names exactly the same matches at every position. Returns the number of
/// matches successfully cross-checked.
///
/// Any mismatch — a finder/file disagreement, a malformed record, or trailing
/// data after the expected end — is reported as
/// [`TmfError::VerificationFailed`], carrying however many matches were
/// confirmed before the problem was found.
pub fn verify(
    finder_kind: FinderKind,
    input: &[u8],
    interpolated_bytes: &[u8],
    progress_period: Option<u64>,
) -> Result<u64> {
    let mut reader = Cursor::new(interpolated_bytes);
    let header = Header::read_from(&mut reader)?;
    header.validate()?;
    if !header.is_for_interpolated_matches() {
        return Err(TmfError::CorruptFile(
            "expected an interpolated-matches header, found an essential-matches one".into(),
        ));
    }
    if header.input_size as usize != input.len() {
        return Err(TmfError::ValidationFailed(format!(
            "interpolated file was computed over {} bytes, input is {}",
            header.input_size,
            input.len()
        )));
    }

    let min_match = header.min_match as u32;
    let max_match = header.max_match as u32;
    let mut finder: Box<dyn MatchFinder> = finder_kind.build(input, min_match, max_match);
    let mut current_offsets = vec![0u32; max_match as usize + 1];
    let mut progress = ProgressReporter::new(progress_period);

    let mut matches_read: u64 = 0;
    let outcome = run(
        finder.as_mut(),
        input.len(),
        &mut reader,
        min_match,
        max_match,
        &mut current_offsets,
        &mut progress,
        &mut matches_read,
    );

    match outcome {
        Err(e) => Err(TmfError::VerificationFailed { matches_read, reason: e.to_string() }),
        Ok(()) => {
            if reader.position() as usize != interpolated_bytes.len() {
                return Err(TmfError::VerificationFailed {
                    matches_read,
                    reason: "trailing data after the expected end of the interpolated-matches file".into(),
                });
            }
            progress.done();
            report_verification_ok();
            Ok(matches_read)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run(
    finder: &mut dyn MatchFinder,
    input_len: usize,
    interpolated: &mut Cursor<&[u8]>,
    min_match: u32,
    max_match: u32,
    current_offsets: &mut [u32],
    progress: &mut ProgressReporter,
    matches_read: &mut u64,
) -> Result<()> {
    for position in 0..input_len as u32 {
        let current_max_match = finder.collect_next(current_offsets);
        for length in min_match..=current_max_match {
            let interpolated_match = Match::read_from(interpolated)?;
            interpolated_match.validate(min_match, max_match)?;
            let expected_offset = current_offsets[length as usize];
            if interpolated_match.position != position
                || interpolated_match.length != length
                || interpolated_match.offset != expected_offset
            {
                return Err(TmfError::ValidationFailed(format!(
                    "interpolated match {interpolated_match:?} disagrees with the match finder's \
                     position {position} length {length} offset {expected_offset}"
                )));
            }
            *matches_read += 1;
        }
        progress.tick(position as u64 + 1);
    }
    Ok(())
}
