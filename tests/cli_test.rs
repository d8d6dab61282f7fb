//! CLI integration tests for pydock
//!
//! These tests verify the CLI surface works correctly.
//! Run with: cargo test --test cli_test

use std::process::Command;

/// Get the path to the pydock binary
fn pydock_bin() -> String {
    // Use debug build for tests
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    format!("{}/target/debug/pydock", manifest_dir)
}

/// Run pydock with given args and return (exit_code, stdout, stderr)
fn run_cmd(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(pydock_bin())
        .args(args)
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

#[test]
fn test_help() {
    let (exit_code, stdout, _stderr) = run_cmd(&["--help"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Run user-supplied Python code"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_version() {
    let (exit_code, stdout, _stderr) = run_cmd(&["--version"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("pydock"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    let (exit_code, _stdout, stderr) = run_cmd(&["--definitely-not-a-flag"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("unexpected argument") || stderr.contains("error"));
}

#[test]
fn test_missing_config_file_fails() {
    let (exit_code, _stdout, stderr) = run_cmd(&["--config", "/nonexistent/pydock.toml"]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("config"));
}
