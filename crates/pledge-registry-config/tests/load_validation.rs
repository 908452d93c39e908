//! Config load validation tests for pledge-registry-config.
// crates/pledge-registry-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use pledge_registry_config::PledgeRegistryConfig;
use pledge_registry_config::config_toml_example;
use tempfile::NamedTempFile;

mod common;

use common::assert_invalid;

type TestResult = Result<(), String>;

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(PledgeRegistryConfig::load(Some(path)), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(PledgeRegistryConfig::load(Some(path)), "config path component too long")
}

#[test]
fn load_rejects_missing_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(PledgeRegistryConfig::load(Some(&path)), "config io error")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'#'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(PledgeRegistryConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(PledgeRegistryConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_validates_after_parsing() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[rate_limit]\nmax_submissions = 0\n").map_err(|err| err.to_string())?;
    assert_invalid(
        PledgeRegistryConfig::load(Some(file.path())),
        "rate_limit.max_submissions must be greater than zero",
    )
}

#[test]
fn load_accepts_example_config() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(config_toml_example().as_bytes()).map_err(|err| err.to_string())?;
    let config = PledgeRegistryConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.rate_limit.max_submissions != 5 {
        return Err("example config should keep the default quota".to_string());
    }
    Ok(())
}
