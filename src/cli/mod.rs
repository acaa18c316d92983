//! Command-line surface for the `tmf` binary.
//!
//! Three subcommands: `find-matches`, `interpolate`, and `verify`, each
//! taking an optional trailing progress period (in positions).

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::match_finder::FinderKind;

#[derive(Parser)]
#[command(name = "tmf", version, about = "Optimal LZ77 match-table extraction, interpolation, and verification")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Finds all optimal matches in `input` and stores the essential ones.
    FindMatches {
        /// Match finder to use: `brute-force` or `hashed` (also accepts the
        /// `bfmf`/`hmmf` abbreviations).
        finder: String,
        /// Minimum match length, 1 <= min <= max.
        min_match: u16,
        /// Maximum match length, min <= max <= 120.
        max_match: u16,
        /// Input file with the original data.
        input: PathBuf,
        /// File to store essential matches in.
        essential: PathBuf,
        /// Optional period, in positions, for progress reporting.
        progress: Option<u64>,
    },
    /// Reconstructs the full set of optimal matches from the essential ones.
    Interpolate {
        /// File with essential matches.
        essential: PathBuf,
        /// File to store the full set of optimal matches in.
        interpolated: PathBuf,
        /// Optional period, in positions, for progress reporting.
        progress: Option<u64>,
    },
    /// Verifies presence of all optimal matches after interpolation.
    Verify {
        /// Match finder to re-derive matches with: `brute-force` or `hashed`.
        finder: String,
        /// Input file with the original data.
        input: PathBuf,
        /// File with the full set of optimal matches.
        interpolated: PathBuf,
        /// Optional period, in positions, for progress reporting.
        progress: Option<u64>,
    },
}

/// Parses `argv` and runs the selected subcommand.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::FindMatches { finder, min_match, max_match, input, essential, progress } => {
            run_find_matches(&finder, min_match, max_match, &input, &essential, progress)
        }
        Command::Interpolate { essential, interpolated, progress } => {
            run_interpolate(&essential, &interpolated, progress)
        }
        Command::Verify { finder, input, interpolated, progress } => {
            run_verify(&finder, &input, &interpolated, progress)
        }
    }
}

fn resolve_finder(name: &str) -> Result<FinderKind> {
    FinderKind::parse(name)
        .ok_or_else(|| anyhow::Error::new(crate::error::TmfError::UnknownFinder(name.to_string())))
}

fn run_find_matches(
    finder: &str,
    min_match: u16,
    max_match: u16,
    input_path: &PathBuf,
    essential_path: &PathBuf,
    progress: Option<u64>,
) -> Result<()> {
    let finder_kind = resolve_finder(finder)?;
    let input = fs::read(input_path).with_context(|| format!("reading {}", input_path.display()))?;
    let mut essential_file =
        fs::File::create(essential_path).with_context(|| format!("creating {}", essential_path.display()))?;
    let mut buffer = Vec::new();
    crate::find_all_essential_matches(finder_kind, min_match, max_match, &input, &mut buffer, progress)?;
    essential_file.write_all(&buffer).with_context(|| format!("writing {}", essential_path.display()))?;
    Ok(())
}

fn run_interpolate(essential_path: &PathBuf, interpolated_path: &PathBuf, progress: Option<u64>) -> Result<()> {
    let essential =
        fs::read(essential_path).with_context(|| format!("reading {}", essential_path.display()))?;
    let mut buffer = Vec::new();
    crate::interpolate(&essential, &mut buffer, progress)?;
    fs::write(interpolated_path, &buffer)
        .with_context(|| format!("writing {}", interpolated_path.display()))?;
    Ok(())
}

fn run_verify(
    finder: &str,
    input_path: &PathBuf,
    interpolated_path: &PathBuf,
    progress: Option<u64>,
) -> Result<()> {
    let finder_kind = resolve_finder(finder)?;
    let input = fs::read(input_path).with_context(|| format!("reading {}", input_path.display()))?;
    let interpolated = fs::read(interpolated_path)
        .with_context(|| format!("reading {}", interpolated_path.display()))?;
    crate::verify(finder_kind, &input, &interpolated, progress)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_finder_accepts_known_names() {
        assert!(resolve_finder("brute-force").is_ok());
        assert!(resolve_finder("hmmf").is_ok());
    }

    #[test]
    fn resolve_finder_rejects_unknown_names() {
        assert!(resolve_finder("zstd").is_err());
    }

    #[test]
    fn cli_parses_find_matches() {
        let cli = Cli::try_parse_from([
            "tmf", "find-matches", "hashed", "3", "8", "in.bin", "essential.bin",
        ])
        .unwrap();
        match cli.command {
            Command::FindMatches { finder, min_match, max_match, .. } => {
                assert_eq!(finder, "hashed");
                assert_eq!(min_match, 3);
                assert_eq!(max_match, 8);
            }
            _ => panic!("expected FindMatches"),
        }
    }

    #[test]
    fn cli_parses_optional_progress() {
        let cli = Cli::try_parse_from([
            "tmf", "interpolate", "essential.bin", "interpolated.bin", "4096",
        ])
        .unwrap();
        match cli.command {
            Command::Interpolate { progress, .. } => assert_eq!(progress, Some(4096)),
            _ => panic!("expected Interpolate"),
        }
    }

    #[test]
    fn cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["tmf", "compress", "x"]).is_err());
    }
}
