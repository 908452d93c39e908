// crates/pledge-registry-server/src/lib.rs
// ============================================================================
// Module: Pledge Registry Server Library
// Description: HTTP surface for pledge submission, count, and admin listing.
// Purpose: Expose the server, audit sinks, and admin authentication.
// Dependencies: pledge-registry-core, pledge-registry-config, axum
// ============================================================================

//! ## Overview
//! `pledge-registry-server` wires the submission service, the `SQLite` pledge
//! store, and the rate-limit ledger behind an axum router. Request inputs are
//! untrusted; storage failures are logged through the audit sink and reach
//! clients only as generic messages.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod auth;
pub mod server;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::FileAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use auth::AdminCredentials;
pub use auth::AuthError;
pub use server::PledgeServer;
pub use server::ServerError;
