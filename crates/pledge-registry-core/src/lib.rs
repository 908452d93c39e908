// crates/pledge-registry-core/src/lib.rs
// ============================================================================
// Module: Pledge Registry Core Library
// Description: Public API surface for the pledge registry core.
// Purpose: Expose domain types, storage interfaces, and submission runtime.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Pledge registry core owns the submission-processing path: validation,
//! sanitization, per-address rate limiting, duplicate-safe persistence, and
//! the public pledge count. Storage and time are injected through explicit
//! interfaces so the HTTP layer and tests choose the backing implementations.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::InsertError;
pub use interfaces::LedgerCommit;
pub use interfaces::PledgeStore;
pub use interfaces::RateLimitLedger;
pub use interfaces::RateLimitStore;
pub use interfaces::StoreError;
pub use runtime::DEFAULT_MAX_SUBMISSIONS;
pub use runtime::DEFAULT_WINDOW_SECONDS;
pub use runtime::INVALID_METHOD_MESSAGE;
pub use runtime::InMemoryPledgeStore;
pub use runtime::InMemoryRateLimitStore;
pub use runtime::RateLimitDecision;
pub use runtime::RateLimitPolicy;
pub use runtime::RateLimiter;
pub use runtime::SUCCESS_MESSAGE;
pub use runtime::SharedPledgeStore;
pub use runtime::SharedRateLimitStore;
pub use runtime::SubmissionError;
pub use runtime::SubmissionReceipt;
pub use runtime::SubmissionRequest;
pub use runtime::SubmissionResult;
pub use runtime::SubmissionService;
pub use runtime::apply_policy;
pub use runtime::count_pledges;
