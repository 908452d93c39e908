// crates/pledge-registry-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic example for docs and the CLI.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for pledge registry configuration. The example must
//! always load and validate; a test in this crate enforces that.

/// Returns a canonical example `pledge-registry.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"[server]
bind = "127.0.0.1:8080"
max_body_bytes = 65536
cors_allow_origin = "*"
trust_proxy_headers = false

[server.audit]
enabled = true
# path = "logs/pledge-audit.jsonl"

[store]
path = "database/pledges.db"
busy_timeout_ms = 5000
journal_mode = "wal"
sync_mode = "full"

[rate_limit]
backend = "file"
path = "database/rate_limits.json"
window_seconds = 3600
max_submissions = 5

[admin]
username = "admin"
password = "change-me"
realm = "Sane Tech Interviews Admin"
"#,
    )
}
