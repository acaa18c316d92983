//! End-to-end coverage of the `tmf` binary's behavior on malformed input:
//! truncated files, bad magic numbers, and tampered match records should all
//! fail with a non-zero exit code and a `tmf: ` prefixed message, never a panic.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

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

fn build_essential_file(dir: &TempDir, content: &[u8]) -> (PathBuf, PathBuf) {
    let input = dir.path().join("input.bin");
    fs::write(&input, content).unwrap();
    let essential = dir.path().join("essential.bin");
    let status = Command::new(tmf_bin())
        .args(["find-matches", "hashed", "2", "5", input.to_str().unwrap(), essential.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());
    (input, essential)
}

#[test]
fn interpolate_rejects_truncated_essential_file() {
    let dir = TempDir::new().unwrap();
    let (_input, essential) = build_essential_file(&dir, b"abcabcabcabc");
    let bytes = fs::read(&essential).unwrap();
    let truncated = dir.path().join("truncated.bin");
    fs::write(&truncated, &bytes[..bytes.len() - 3]).unwrap();

    let interpolated = dir.path().join("interpolated.bin");
    let output = Command::new(tmf_bin())
        .args(["interpolate", truncated.to_str().unwrap(), interpolated.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("tmf: "));
}

#[test]
fn interpolate_rejects_bad_magic() {
    let dir = TempDir::new().unwrap();
    let garbage = dir.path().join("garbage.bin");
    fs::write(&garbage, [0u8; 16]).unwrap();

    let interpolated = dir.path().join("interpolated.bin");
    let output = Command::new(tmf_bin())
        .args(["interpolate", garbage.to_str().unwrap(), interpolated.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("corrupt file"));
}

#[test]
fn verify_reports_tampered_match_record() {
    let dir = TempDir::new().unwrap();
    let (input, essential) = build_essential_file(&dir, b"abcabcabcxabcabcabc");
    let interpolated = dir.path().join("interpolated.bin");
    let status = Command::new(tmf_bin())
        .args(["interpolate", essential.to_str().unwrap(), interpolated.to_str().unwrap()])
        .status()
        .unwrap();
    assert!(status.success());

    let mut bytes = fs::read(&interpolated).unwrap();
    // Header is 16 bytes; the first match record's length field starts at
    // byte 4 within the 16-byte record that follows.
    let length_field = 16 + 4;
    bytes[length_field] ^= 0xFF;
    fs::write(&interpolated, &bytes).unwrap();

    let output = Command::new(tmf_bin())
        .args(["verify", "brute-force", input.to_str().unwrap(), interpolated.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("tmf: "));
    assert!(stderr.contains("verification failed"));
}

#[test]
fn verify_rejects_essential_file_passed_in_place_of_interpolated() {
    let dir = TempDir::new().unwrap();
    let (input, essential) = build_essential_file(&dir, b"abcabcabc");

    let output = Command::new(tmf_bin())
        .args(["verify", "brute-force", input.to_str().unwrap(), essential.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("tmf: "));
}
