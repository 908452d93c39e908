// crates/pledge-registry-core/src/core/mod.rs
// ============================================================================
// Module: Pledge Registry Core Types
// Description: Domain model, form input, validation, and sanitization.
// Purpose: Group the pure, I/O-free building blocks of pledge submission.
// Dependencies: serde, sha2, time, url
// ============================================================================

//! ## Overview
//! Pure domain logic. Nothing in this module touches storage or the clock
//! directly; callers pass timestamps and forms in.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod clock;
pub mod form;
pub mod hashing;
pub mod pledge;
pub mod sanitize;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use clock::Clock;
pub use clock::ManualClock;
pub use clock::SharedClock;
pub use clock::SystemClock;
pub use clock::Timestamp;
pub use form::SubmissionForm;
pub use hashing::client_fingerprint;
pub use pledge::NewPledge;
pub use pledge::Pledge;
pub use pledge::PledgeId;
pub use pledge::PledgeStats;
pub use sanitize::SanitizedSubmission;
pub use sanitize::escape_html;
pub use sanitize::sanitize_submission;
pub use validation::FormField;
pub use validation::ValidationIssue;
pub use validation::is_valid_email;
pub use validation::is_valid_website;
pub use validation::join_messages;
pub use validation::validate_submission;
