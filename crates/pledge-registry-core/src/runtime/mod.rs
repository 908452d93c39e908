// crates/pledge-registry-core/src/runtime/mod.rs
// ============================================================================
// Module: Pledge Registry Runtime
// Description: Submission orchestration, rate limiting, and store wrappers.
// Purpose: Compose the pure core with injected storage and clocks.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The runtime turns a raw form plus client address into exactly one
//! [`SubmissionResult`]. It also provides in-memory store fakes and shared
//! trait-object wrappers used by the server.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod count;
pub mod rate_limit;
pub mod store;
pub mod submission;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use count::count_pledges;
pub use rate_limit::DEFAULT_MAX_SUBMISSIONS;
pub use rate_limit::DEFAULT_WINDOW_SECONDS;
pub use rate_limit::RateLimitDecision;
pub use rate_limit::RateLimitPolicy;
pub use rate_limit::RateLimiter;
pub use rate_limit::apply_policy;
pub use store::InMemoryPledgeStore;
pub use store::InMemoryRateLimitStore;
pub use store::SharedPledgeStore;
pub use store::SharedRateLimitStore;
pub use submission::INVALID_METHOD_MESSAGE;
pub use submission::SUCCESS_MESSAGE;
pub use submission::SubmissionError;
pub use submission::SubmissionReceipt;
pub use submission::SubmissionRequest;
pub use submission::SubmissionResult;
pub use submission::SubmissionService;
