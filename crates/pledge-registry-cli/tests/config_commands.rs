// crates/pledge-registry-cli/tests/config_commands.rs
// ============================================================================
// Module: CLI Config Command Tests
// Description: Integration tests for CLI config validation workflows.
// Purpose: Ensure config validation reports success and fails closed on errors.
// Dependencies: pledge-registry-cli binary
// ============================================================================

//! ## Overview
//! Runs the CLI binary for config validation and the example printer, and
//! ensures invalid configuration fails with explicit errors.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn pledge_registry_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pledge-registry"))
}

fn validate(config_path: &Path) -> Output {
    Command::new(pledge_registry_bin())
        .args(["config", "validate", "--config", config_path.to_string_lossy().as_ref()])
        .output()
        .expect("config validate")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Verifies config validation succeeds for a minimal config.
#[test]
fn cli_config_validate_accepts_valid_config() {
    let root = TempDir::new().expect("temp dir");
    let config_path = root.path().join("pledge-registry.toml");
    let config = r#"
[server]
bind = "127.0.0.1:0"

[rate_limit]
max_submissions = 3
"#;
    fs::write(&config_path, config.trim()).expect("write config");

    let output = validate(&config_path);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Config valid"), "unexpected stdout: {stdout}");
}

/// Verifies config validation fails on an out-of-range section value.
#[test]
fn cli_config_validate_rejects_zero_quota() {
    let root = TempDir::new().expect("temp dir");
    let config_path = root.path().join("pledge-registry.toml");
    fs::write(&config_path, "[rate_limit]\nmax_submissions = 0\n").expect("write config");

    let output = validate(&config_path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to load config"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("rate_limit.max_submissions"), "unexpected stderr: {stderr}");
}

/// Verifies unknown keys are rejected.
#[test]
fn cli_config_validate_rejects_unknown_keys() {
    let root = TempDir::new().expect("temp dir");
    let config_path = root.path().join("pledge-registry.toml");
    fs::write(&config_path, "[server]\nport = 8080\n").expect("write config");

    let output = validate(&config_path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config parse error"), "unexpected stderr: {stderr}");
}

/// Verifies the printed example validates when written back to disk.
#[test]
fn cli_config_example_round_trips_through_validate() {
    let output = Command::new(pledge_registry_bin())
        .args(["config", "example"])
        .output()
        .expect("config example");
    assert!(output.status.success());
    let example = String::from_utf8(output.stdout).expect("utf-8 example");
    assert!(example.contains("[admin]"), "unexpected example: {example}");

    let root = TempDir::new().expect("temp dir");
    let config_path = root.path().join("pledge-registry.toml");
    fs::write(&config_path, example).expect("write example");
    assert!(validate(&config_path).status.success());
}
