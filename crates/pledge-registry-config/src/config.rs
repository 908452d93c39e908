// crates/pledge-registry-config/src/config.rs
// ============================================================================
// Module: Pledge Registry Configuration
// Description: Configuration loading and validation for the pledge registry.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: pledge-registry-core, pledge-registry-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Every section is optional and falls back to defaults suitable for a single
//! host deployment; anything present is validated and rejected when invalid.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use pledge_registry_core::DEFAULT_MAX_SUBMISSIONS;
use pledge_registry_core::DEFAULT_WINDOW_SECONDS;
use pledge_registry_core::RateLimitPolicy;
use pledge_registry_store_sqlite::SqliteStoreConfig;
use pledge_registry_store_sqlite::SqliteStoreMode;
use pledge_registry_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "pledge-registry.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "PLEDGE_REGISTRY_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default HTTP bind address.
pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default maximum request body size in bytes.
pub(crate) const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
/// Maximum allowed request body size in bytes.
pub(crate) const MAX_MAX_BODY_BYTES: usize = 1024 * 1024;
/// Default CORS allow-origin value.
pub(crate) const DEFAULT_CORS_ALLOW_ORIGIN: &str = "*";
/// Default pledge database path.
pub(crate) const DEFAULT_STORE_PATH: &str = "database/pledges.db";
/// Default `SQLite` busy timeout in milliseconds.
pub(crate) const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Default rate-limit ledger path.
pub(crate) const DEFAULT_RATE_LIMIT_PATH: &str = "database/rate_limits.json";
/// Maximum rate-limit window (30 days).
pub(crate) const MAX_WINDOW_SECONDS: u64 = 30 * 24 * 60 * 60;
/// Maximum submissions per window.
pub(crate) const MAX_SUBMISSIONS_LIMIT: usize = 10_000;
/// Default admin realm.
pub(crate) const DEFAULT_ADMIN_REALM: &str = "Sane Tech Interviews Admin";
/// Maximum length of admin credentials and realm.
pub(crate) const MAX_ADMIN_FIELD_LENGTH: usize = 256;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Pledge registry configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PledgeRegistryConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Pledge database configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Submission rate-limit configuration.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Admin dashboard credentials; absent disables the dashboard.
    #[serde(default)]
    pub admin: Option<AdminConfig>,
}

impl PledgeRegistryConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.store.validate()?;
        self.rate_limit.validate()?;
        if let Some(admin) = &self.admin {
            admin.validate()?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    /// Value of `Access-Control-Allow-Origin` on API responses.
    #[serde(default = "default_cors_allow_origin")]
    pub cors_allow_origin: String,
    /// Honor `X-Forwarded-For` and `X-Real-IP` when resolving client addresses.
    #[serde(default)]
    pub trust_proxy_headers: bool,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: ServerAuditConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_body_bytes: default_max_body_bytes(),
            cors_allow_origin: default_cors_allow_origin(),
            trust_proxy_headers: false,
            audit: ServerAuditConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Returns the parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("invalid server.bind: {}", self.bind)))
    }

    /// Validates server configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        if self.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes exceeds limit of {MAX_MAX_BODY_BYTES}"
            )));
        }
        let origin = self.cors_allow_origin.trim();
        if origin.is_empty() {
            return Err(ConfigError::Invalid(
                "server.cors_allow_origin must be non-empty".to_string(),
            ));
        }
        if !origin.chars().all(|ch| ch.is_ascii_graphic()) {
            return Err(ConfigError::Invalid(
                "server.cors_allow_origin must be printable ascii without spaces".to_string(),
            ));
        }
        self.audit.validate()
    }
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerAuditConfig {
    /// Enable structured audit logging.
    #[serde(default = "default_audit_enabled")]
    pub enabled: bool,
    /// Optional audit log path (JSON lines); stderr when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for ServerAuditConfig {
    fn default() -> Self {
        Self {
            enabled: default_audit_enabled(),
            path: None,
        }
    }
}

impl ServerAuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("server.audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Pledge database configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    /// `SQLite` database path.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` synchronous mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

impl StoreConfig {
    /// Returns the `SQLite` store configuration.
    #[must_use]
    pub fn sqlite_config(&self) -> SqliteStoreConfig {
        SqliteStoreConfig {
            path: self.path.clone(),
            busy_timeout_ms: self.busy_timeout_ms,
            journal_mode: self.journal_mode,
            sync_mode: self.sync_mode,
        }
    }

    /// Validates store configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("store.path", &self.path.to_string_lossy())?;
        if self.busy_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "store.busy_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Rate Limit
// ============================================================================

/// Rate-limit ledger backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RateLimitBackend {
    /// JSON ledger file shared by every process on the host.
    #[default]
    File,
    /// Process-local ledger lost on restart.
    Memory,
}

/// Submission rate-limit configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    /// Ledger backend.
    #[serde(default)]
    pub backend: RateLimitBackend,
    /// Ledger file path for the `file` backend.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Rolling window length in seconds.
    #[serde(default = "default_window_seconds")]
    pub window_seconds: u64,
    /// Maximum admitted submissions per address per window.
    #[serde(default = "default_max_submissions")]
    pub max_submissions: usize,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            backend: RateLimitBackend::default(),
            path: None,
            window_seconds: default_window_seconds(),
            max_submissions: default_max_submissions(),
        }
    }
}

impl RateLimitConfig {
    /// Returns the ledger path for the `file` backend; `None` for memory.
    #[must_use]
    pub fn ledger_path(&self) -> Option<PathBuf> {
        match self.backend {
            RateLimitBackend::File => {
                Some(self.path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_RATE_LIMIT_PATH)))
            }
            RateLimitBackend::Memory => None,
        }
    }

    /// Returns the rate-limit policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the window does not fit the policy.
    pub fn policy(&self) -> Result<RateLimitPolicy, ConfigError> {
        let window_seconds = i64::try_from(self.window_seconds).map_err(|_| {
            ConfigError::Invalid("rate_limit.window_seconds out of range".to_string())
        })?;
        Ok(RateLimitPolicy {
            window_seconds,
            max_submissions: self.max_submissions,
        })
    }

    /// Validates rate-limit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.backend, &self.path) {
            (RateLimitBackend::Memory, Some(_)) => {
                return Err(ConfigError::Invalid(
                    "memory rate_limit backend must not set path".to_string(),
                ));
            }
            (RateLimitBackend::File, Some(path)) => {
                validate_path_string("rate_limit.path", &path.to_string_lossy())?;
            }
            _ => {}
        }
        if self.window_seconds == 0 {
            return Err(ConfigError::Invalid(
                "rate_limit.window_seconds must be greater than zero".to_string(),
            ));
        }
        if self.window_seconds > MAX_WINDOW_SECONDS {
            return Err(ConfigError::Invalid(format!(
                "rate_limit.window_seconds exceeds limit of {MAX_WINDOW_SECONDS}"
            )));
        }
        if self.max_submissions == 0 {
            return Err(ConfigError::Invalid(
                "rate_limit.max_submissions must be greater than zero".to_string(),
            ));
        }
        if self.max_submissions > MAX_SUBMISSIONS_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "rate_limit.max_submissions exceeds limit of {MAX_SUBMISSIONS_LIMIT}"
            )));
        }
        self.policy().map(|_| ())
    }
}

// ============================================================================
// SECTION: Admin
// ============================================================================

/// Admin dashboard credentials.
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminConfig {
    /// Basic auth username.
    pub username: String,
    /// Basic auth password.
    pub password: String,
    /// Basic auth realm.
    #[serde(default = "default_admin_realm")]
    pub realm: String,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("realm", &self.realm)
            .finish()
    }
}

impl AdminConfig {
    /// Validates admin configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::Invalid("admin.username must be non-empty".to_string()));
        }
        if self.username.contains(':') {
            return Err(ConfigError::Invalid("admin.username must not contain ':'".to_string()));
        }
        if self.password.is_empty() {
            return Err(ConfigError::Invalid("admin.password must be non-empty".to_string()));
        }
        if self.realm.contains('"') || self.realm.chars().any(char::is_control) {
            return Err(ConfigError::Invalid(
                "admin.realm must not contain quotes or control characters".to_string(),
            ));
        }
        for (field, value) in
            [("username", &self.username), ("password", &self.password), ("realm", &self.realm)]
        {
            if value.len() > MAX_ADMIN_FIELD_LENGTH {
                return Err(ConfigError::Invalid(format!("admin.{field} exceeds max length")));
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Defaults
// ============================================================================

/// Returns the default bind address.
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

/// Returns the default maximum body size.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Returns the default CORS origin.
fn default_cors_allow_origin() -> String {
    DEFAULT_CORS_ALLOW_ORIGIN.to_string()
}

/// Returns the default audit enablement.
const fn default_audit_enabled() -> bool {
    true
}

/// Returns the default database path.
fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Returns the default busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Returns the default rate-limit window.
const fn default_window_seconds() -> u64 {
    DEFAULT_WINDOW_SECONDS.unsigned_abs()
}

/// Returns the default submission cap.
const fn default_max_submissions() -> usize {
    DEFAULT_MAX_SUBMISSIONS
}

/// Returns the default admin realm.
fn default_admin_realm() -> String {
    DEFAULT_ADMIN_REALM.to_string()
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
