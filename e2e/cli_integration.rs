//! Tests the `tmf` binary as a black-box CLI tool using `std::process::Command`.
//! Covers the find-matches / interpolate / verify pipeline end to end.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `tmf` binary produced by Cargo.
fn tmf_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_tmf") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("tmf");
    p
}

fn make_temp_input(dir: &TempDir, content: &[u8]) -> PathBuf {
    let input_path = dir.path().join("input.bin");
    fs::write(&input_path, content).unwrap();
    input_path
}

#[test]
fn find_matches_then_interpolate_then_verify_round_trip() {
    let dir = TempDir::new().unwrap();
    let content = b"the quick brown fox jumps over the lazy dog the quick brown fox".repeat(4);
    let input = make_temp_input(&dir, &content);
    let essential = dir.path().join("essential.bin");
    let interpolated = dir.path().join("interpolated.bin");

    let status = Command::new(tmf_bin())
        .args([
            "find-matches",
            "hashed",
            "3",
            "8",
            input.to_str().unwrap(),
            essential.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run tmf find-matches");
    assert!(status.success(), "find-matches should exit 0");
    assert!(essential.exists());

    let status = Command::new(tmf_bin())
        .args(["interpolate", essential.to_str().unwrap(), interpolated.to_str().unwrap()])
        .status()
        .expect("failed to run tmf interpolate");
    assert!(status.success(), "interpolate should exit 0");
    assert!(interpolated.exists());

    let status = Command::new(tmf_bin())
        .args([
            "verify",
            "brute-force",
            input.to_str().unwrap(),
            interpolated.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run tmf verify");
    assert!(status.success(), "verify should exit 0 when matches agree");
}

#[test]
fn find_matches_accepts_legacy_finder_aliases() {
    let dir = TempDir::new().unwrap();
    let input = make_temp_input(&dir, b"abcabcabcabc");
    let essential = dir.path().join("essential.bin");

    let status = Command::new(tmf_bin())
        .args(["find-matches", "bfmf", "2", "4", input.to_str().unwrap(), essential.to_str().unwrap()])
        .status()
        .expect("failed to run tmf find-matches with legacy alias");
    assert!(status.success());
}

#[test]
fn find_matches_with_progress_period_reports_status() {
    let dir = TempDir::new().unwrap();
    let input = make_temp_input(&dir, &vec![b'a'; 32]);
    let essential = dir.path().join("essential.bin");

    let output = Command::new(tmf_bin())
        .args([
            "find-matches",
            "hashed",
            "1",
            "4",
            input.to_str().unwrap(),
            essential.to_str().unwrap(),
            "8",
        ])
        .output()
        .expect("failed to run tmf find-matches with progress");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Progress status: processed"));
    assert!(stdout.contains("Done"));
}

#[test]
fn unknown_finder_name_exits_nonzero_with_stderr_prefix() {
    let dir = TempDir::new().unwrap();
    let input = make_temp_input(&dir, b"abc");
    let essential = dir.path().join("essential.bin");

    let output = Command::new(tmf_bin())
        .args(["find-matches", "turbo", "1", "2", input.to_str().unwrap(), essential.to_str().unwrap()])
        .output()
        .expect("failed to run tmf find-matches with a bad finder name");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("tmf: "));
}

#[test]
fn missing_subcommand_exits_nonzero() {
    let output = Command::new(tmf_bin()).output().expect("failed to run tmf with no arguments");
    assert!(!output.status.success());
}
