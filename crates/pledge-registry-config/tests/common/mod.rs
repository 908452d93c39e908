// crates/pledge-registry-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for pledge-registry-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use pledge_registry_config::AdminConfig;
use pledge_registry_config::ConfigError;
use pledge_registry_config::PledgeRegistryConfig;

/// Parses a TOML string into a `PledgeRegistryConfig` without validating.
pub fn config_from_toml(toml_str: &str) -> Result<PledgeRegistryConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<PledgeRegistryConfig, toml::de::Error> {
    config_from_toml("")
}

/// Returns a minimal config with the provided admin credentials.
pub fn config_with_admin(username: &str, password: &str) -> Result<PledgeRegistryConfig, String> {
    let mut config = minimal_config().map_err(|err| err.to_string())?;
    config.admin = Some(AdminConfig {
        username: username.to_string(),
        password: password.to_string(),
        realm: "Admin".to_string(),
    });
    Ok(config)
}

/// Asserts that a result failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
