//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the minkeyboard binary (set by cargo at compile time)
pub fn minkeyboard_bin() -> &'static str {
    env!("CARGO_BIN_EXE_minkeyboard")
}

/// Writes `content` to a config.toml inside a fresh temporary directory.
///
/// The directory must be kept alive for as long as the path is used.
pub fn create_temp_config(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    (path, temp_dir)
}

/// Runs the binary with `args`, pointing it at an empty config file so the
/// user's own configuration never leaks into a test.
pub fn run_isolated(args: &[&str]) -> Output {
    let (config_path, _temp_dir) = create_temp_config("");
    let mut full_args: Vec<&str> = args.to_vec();
    full_args.push("--config");
    full_args.push(config_path.to_str().expect("utf-8 temp path"));

    Command::new(minkeyboard_bin())
        .args(&full_args)
        .output()
        .expect("Failed to execute command")
}

/// Parses stdout as JSON, failing with stderr on error.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    assert_eq!(
        output.status.code(),
        Some(0),
        "Command should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should parse JSON")
}
