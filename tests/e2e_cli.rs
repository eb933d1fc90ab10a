//! CLI end-to-end tests
//!
//! Tests for the ffbatch command-line interface. None of these reach ffmpeg.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

/// Get a command for the ffbatch binary
#[allow(deprecated)]
fn ffbatch_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ffbatch").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_no_args_shows_usage() {
    ffbatch_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_help_flag() {
    ffbatch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--pattern"))
        .stdout(predicate::str::contains("--simulate"));
}

#[test]
fn test_cli_rejects_unknown_type() {
    let dir = tempdir().unwrap();
    ffbatch_cmd()
        .args(["-i", dir.path().to_str().unwrap(), "-p", "*.mp4", "-o", "out"])
        .args(["-t", "audio"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown conversion type"));
}

#[test]
fn test_cli_missing_input_directory_fails() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let out = dir.path().join("out");

    ffbatch_cmd()
        .args(["-i", missing.to_str().unwrap(), "-p", "*.mp4"])
        .args(["-o", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input directory"));

    assert!(!out.exists());
}

#[test]
fn test_cli_no_matching_files_is_clean_exit() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();
    let out = dir.path().join("out");

    ffbatch_cmd()
        .args(["-i", dir.path().to_str().unwrap(), "-p", "*.mp4"])
        .args(["-o", out.to_str().unwrap(), "--type", "Subtitle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 files"))
        .stdout(predicate::str::contains("nothing to process"));

    assert!(!out.exists());
}

#[test]
fn test_cli_invalid_pattern_fails() {
    let dir = tempdir().unwrap();
    ffbatch_cmd()
        .args(["-i", dir.path().to_str().unwrap(), "-p", "*.{mp4"])
        .args(["-o", dir.path().join("out").to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid search pattern"));
}

#[test]
fn test_cli_invalid_config_fails() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("ffbatch.toml");
    fs::write(&config, "[encoding\n").unwrap();

    ffbatch_cmd()
        .args(["-i", dir.path().to_str().unwrap(), "-p", "*.mp4"])
        .args(["-o", dir.path().join("out").to_str().unwrap()])
        .args(["-c", config.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
