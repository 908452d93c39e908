// crates/pledge-registry-server/src/audit.rs
// ============================================================================
// Module: Server Audit Logging
// Description: Structured audit events for pledge request handling.
// Purpose: Emit JSON-line audit logs without hard dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Audit events are serialized as one JSON object per line. Request events
//! carry only labels and the client address; store failure detail goes to a
//! separate internal-error event that never reaches the client. Admin events
//! record the username and never the password.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Per-request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct PledgeRequestEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Route label.
    pub route: &'static str,
    /// HTTP method.
    pub method: String,
    /// Resolved client address.
    pub client_address: String,
    /// Outcome label.
    pub outcome: RequestOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// HTTP status code.
    pub status: u16,
}

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// Request served successfully.
    Success,
    /// CORS preflight answered.
    Preflight,
    /// Request refused for a client-side reason.
    Rejected,
    /// Request failed on the server side.
    Error,
}

/// Inputs required to construct a request audit event.
pub struct PledgeRequestEventParams {
    /// Route label.
    pub route: &'static str,
    /// HTTP method.
    pub method: String,
    /// Resolved client address.
    pub client_address: String,
    /// Outcome label.
    pub outcome: RequestOutcome,
    /// Normalized error kind label.
    pub error_kind: Option<&'static str>,
    /// HTTP status code.
    pub status: u16,
}

impl PledgeRequestEvent {
    /// Creates a new request event with a consistent timestamp.
    #[must_use]
    pub fn new(params: PledgeRequestEventParams) -> Self {
        Self {
            event: "pledge_request",
            timestamp_ms: now_ms(),
            route: params.route,
            method: params.method,
            client_address: params.client_address,
            outcome: params.outcome,
            error_kind: params.error_kind,
            status: params.status,
        }
    }
}

/// Server-side detail of a storage or I/O failure.
#[derive(Debug, Clone, Serialize)]
pub struct InternalErrorEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Route label.
    pub route: &'static str,
    /// Error kind label.
    pub error_kind: &'static str,
    /// Full error detail.
    pub detail: String,
}

impl InternalErrorEvent {
    /// Creates a new internal error event.
    #[must_use]
    pub fn new(route: &'static str, error_kind: &'static str, detail: impl Into<String>) -> Self {
        Self {
            event: "pledge_internal_error",
            timestamp_ms: now_ms(),
            route,
            error_kind,
            detail: detail.into(),
        }
    }
}

/// Admin dashboard access decision.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAccessEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Decision outcome (`allow` or `deny`).
    pub decision: &'static str,
    /// Resolved client address.
    pub client_address: String,
    /// Presented username, when one could be parsed.
    pub username: Option<String>,
    /// Failure reason (for deny events).
    pub reason: Option<String>,
}

impl AdminAccessEvent {
    /// Builds an allow event.
    #[must_use]
    pub fn allowed(client_address: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            event: "admin_access",
            timestamp_ms: now_ms(),
            decision: "allow",
            client_address: client_address.into(),
            username: Some(username.into()),
            reason: None,
        }
    }

    /// Builds a deny event.
    #[must_use]
    pub fn denied(
        client_address: impl Into<String>,
        username: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            event: "admin_access",
            timestamp_ms: now_ms(),
            decision: "deny",
            client_address: client_address.into(),
            username,
            reason: Some(reason.into()),
        }
    }
}

/// Server lifecycle and posture event.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Lifecycle event kind.
    pub kind: &'static str,
    /// Optional message.
    pub message: Option<String>,
}

impl LifecycleEvent {
    /// Creates a new lifecycle event.
    #[must_use]
    pub fn new(kind: &'static str, message: Option<String>) -> Self {
        Self {
            event: "server_lifecycle",
            timestamp_ms: now_ms(),
            kind,
            message,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for pledge server events.
pub trait AuditSink: Send + Sync {
    /// Record a request event.
    fn record(&self, event: &PledgeRequestEvent);

    /// Record an internal error event.
    fn record_internal_error(&self, _event: &InternalErrorEvent) {}

    /// Record an admin access event.
    fn record_admin(&self, _event: &AdminAccessEvent) {}

    /// Record a lifecycle event.
    fn record_lifecycle(&self, _event: &LifecycleEvent) {}
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl StderrAuditSink {
    /// Writes one serialized event to stderr.
    fn emit(event: &impl Serialize) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &PledgeRequestEvent) {
        Self::emit(event);
    }

    fn record_internal_error(&self, event: &InternalErrorEvent) {
        Self::emit(event);
    }

    fn record_admin(&self, event: &AdminAccessEvent) {
        Self::emit(event);
    }

    fn record_lifecycle(&self, event: &LifecycleEvent) {
        Self::emit(event);
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event.
    fn emit(&self, event: &impl Serialize) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl AuditSink for FileAuditSink {
    fn record(&self, event: &PledgeRequestEvent) {
        self.emit(event);
    }

    fn record_internal_error(&self, event: &InternalErrorEvent) {
        self.emit(event);
    }

    fn record_admin(&self, event: &AdminAccessEvent) {
        self.emit(event);
    }

    fn record_lifecycle(&self, event: &LifecycleEvent) {
        self.emit(event);
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &PledgeRequestEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current wall-clock time in milliseconds since the epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Tests
// ============================================================================
