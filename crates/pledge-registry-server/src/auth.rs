// crates/pledge-registry-server/src/auth.rs
// ============================================================================
// Module: Admin Authentication
// Description: HTTP Basic authentication for the admin dashboard.
// Purpose: Gate the pledge listing behind one configured credential pair.
// Dependencies: base64, subtle, pledge-registry-config
// ============================================================================

//! ## Overview
//! The admin dashboard accepts a single username/password pair supplied via
//! `Authorization: Basic`. Both halves are compared in constant time and
//! both comparisons always run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use pledge_registry_config::AdminConfig;
use subtle::ConstantTimeEq;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted `Authorization` header length.
const MAX_AUTH_HEADER_BYTES: usize = 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Admin authentication failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header was sent.
    #[error("missing authorization")]
    Missing,
    /// The header was not valid Basic credentials.
    #[error("invalid authorization header: {0}")]
    Malformed(&'static str),
    /// The credentials did not match.
    #[error("invalid credentials")]
    InvalidCredentials {
        /// Username presented by the client.
        username: String,
    },
}

impl AuthError {
    /// Returns the username the client presented, when one was parsed.
    #[must_use]
    pub fn attempted_username(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials {
                username,
            } => Some(username),
            Self::Missing | Self::Malformed(_) => None,
        }
    }
}

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Configured admin credential pair.
#[derive(Clone)]
pub struct AdminCredentials {
    /// Expected username.
    username: String,
    /// Expected password.
    password: String,
    /// Realm announced in challenges.
    realm: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("realm", &self.realm)
            .finish()
    }
}

impl AdminCredentials {
    /// Creates credentials from explicit values.
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        realm: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            realm: realm.into(),
        }
    }

    /// Creates credentials from the admin config section.
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(&config.username, &config.password, &config.realm)
    }

    /// Returns the `WWW-Authenticate` challenge value.
    #[must_use]
    pub fn challenge(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm)
    }

    /// Authorizes an `Authorization` header value, returning the username.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] when the header is absent, malformed, or wrong.
    pub fn authorize(&self, header: Option<&str>) -> Result<String, AuthError> {
        let (username, password) = parse_basic_credentials(header)?;
        let username_ok = constant_time_eq_str(&username, &self.username);
        let password_ok = constant_time_eq_str(&password, &self.password);
        if username_ok & password_ok {
            Ok(username)
        } else {
            Err(AuthError::InvalidCredentials {
                username,
            })
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses `Basic <base64(user:pass)>` into its two halves.
///
/// # Errors
///
/// Returns [`AuthError`] when the header is absent or malformed.
pub fn parse_basic_credentials(header: Option<&str>) -> Result<(String, String), AuthError> {
    let header = header.ok_or(AuthError::Missing)?;
    if header.len() > MAX_AUTH_HEADER_BYTES {
        return Err(AuthError::Malformed("header too large"));
    }
    let mut parts = header.trim().splitn(2, ' ');
    let scheme = parts.next().unwrap_or_default();
    let encoded = parts.next().unwrap_or_default().trim();
    if !scheme.eq_ignore_ascii_case("basic") || encoded.is_empty() {
        return Err(AuthError::Malformed("expected basic scheme"));
    }
    let decoded = STANDARD.decode(encoded).map_err(|_| AuthError::Malformed("invalid base64"))?;
    let text = String::from_utf8(decoded).map_err(|_| AuthError::Malformed("invalid utf-8"))?;
    let (username, password) =
        text.split_once(':').ok_or(AuthError::Malformed("missing separator"))?;
    Ok((username.to_string(), password.to_string()))
}

/// Compares two strings in constant time.
#[must_use]
pub fn constant_time_eq_str(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
