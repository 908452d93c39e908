// crates/pledge-registry-core/src/runtime/submission.rs
// ============================================================================
// Module: Pledge Submission Service
// Description: Fail-fast orchestration of one pledge submission.
// Purpose: Turn a raw form and client address into exactly one outcome.
// Dependencies: crate::{core, interfaces, runtime}, serde, thiserror
// ============================================================================

//! ## Overview
//! [`SubmissionService::submit`] runs the pipeline in a fixed order and stops
//! at the first failure:
//!
//! 1. method must be `POST`
//! 2. rate limit (quota consumed only on admission)
//! 3. validation (every issue collected)
//! 4. sanitization
//! 5. store readiness
//! 6. atomic duplicate check and insert
//!
//! Storage failures keep their detail in [`SubmissionError`]'s `Display`
//! for server-side logs; [`SubmissionError::public_message`] is the only
//! text that reaches clients.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::NewPledge;
use crate::core::PledgeId;
use crate::core::SharedClock;
use crate::core::SubmissionForm;
use crate::core::ValidationIssue;
use crate::core::join_messages;
use crate::core::sanitize_submission;
use crate::core::validate_submission;
use crate::interfaces::InsertError;
use crate::interfaces::PledgeStore;
use crate::interfaces::StoreError;
use crate::runtime::rate_limit::RateLimiter;
use crate::runtime::store::SharedPledgeStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// The only accepted submission method.
const SUBMIT_METHOD: &str = "POST";
/// Message returned on success.
pub const SUCCESS_MESSAGE: &str = "Pledge submitted successfully!";
/// Message returned for a wrong request method.
pub const INVALID_METHOD_MESSAGE: &str = "Invalid request method";

// ============================================================================
// SECTION: Types
// ============================================================================

/// One submission attempt as seen by the service.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionRequest<'a> {
    /// HTTP method of the request.
    pub method: &'a str,
    /// Decoded form fields.
    pub form: &'a SubmissionForm,
    /// Resolved client address.
    pub client_address: &'a str,
}

/// Successful submission receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Identifier of the inserted pledge.
    pub pledge_id: PledgeId,
}

/// Uniform client-facing result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Whether the pledge was stored.
    pub success: bool,
    /// Client-safe message.
    pub message: String,
}

impl SubmissionResult {
    /// Builds the client-facing result for a submission outcome.
    #[must_use]
    pub fn from_outcome(outcome: &Result<SubmissionReceipt, SubmissionError>) -> Self {
        match outcome {
            Ok(_) => Self {
                success: true,
                message: SUCCESS_MESSAGE.to_string(),
            },
            Err(err) => Self {
                success: false,
                message: err.public_message(),
            },
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Submission failure taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    /// Request used a method other than `POST`.
    #[error("invalid request method: {0}")]
    InvalidMethod(String),
    /// Client address exceeded its submission quota.
    #[error("rate limited")]
    RateLimited,
    /// One or more fields failed validation.
    #[error("validation failed: {}", join_messages(.0))]
    ValidationFailed(Vec<ValidationIssue>),
    /// A pledge with the same email or company name exists.
    #[error("duplicate pledge")]
    DuplicatePledge,
    /// The insert failed.
    #[error("persistence failed: {0}")]
    PersistenceFailed(String),
    /// Store or ledger unavailable.
    #[error("internal error: {0}")]
    InternalError(String),
}

impl SubmissionError {
    /// Returns the taxonomy label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidMethod(_) => "invalid_method",
            Self::RateLimited => "rate_limited",
            Self::ValidationFailed(_) => "validation_failed",
            Self::DuplicatePledge => "duplicate_pledge",
            Self::PersistenceFailed(_) => "persistence_failed",
            Self::InternalError(_) => "internal_error",
        }
    }

    /// Returns the message safe to show the submitter.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidMethod(_) => INVALID_METHOD_MESSAGE.to_string(),
            Self::RateLimited => "Too many submissions. Please try again later.".to_string(),
            Self::ValidationFailed(issues) => join_messages(issues),
            Self::DuplicatePledge => {
                "A pledge from this email address or company has already been submitted."
                    .to_string()
            }
            Self::PersistenceFailed(_) => "Failed to save pledge. Please try again.".to_string(),
            Self::InternalError(_) => {
                "An internal error occurred. Please try again later.".to_string()
            }
        }
    }

    /// Returns true for failures caused by storage rather than the submitter.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::PersistenceFailed(_) | Self::InternalError(_))
    }
}

impl From<StoreError> for SubmissionError {
    fn from(err: StoreError) -> Self {
        Self::InternalError(err.to_string())
    }
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// Submission pipeline bound to its stores and clock.
#[derive(Clone)]
pub struct SubmissionService {
    /// Pledge table.
    pledges: SharedPledgeStore,
    /// Per-address rate limiter.
    limiter: RateLimiter,
    /// Time source for rate limiting and `created_at`.
    clock: SharedClock,
}

impl SubmissionService {
    /// Creates a submission service.
    #[must_use]
    pub const fn new(pledges: SharedPledgeStore, limiter: RateLimiter, clock: SharedClock) -> Self {
        Self {
            pledges,
            limiter,
            clock,
        }
    }

    /// Returns the pledge store.
    #[must_use]
    pub const fn pledges(&self) -> &SharedPledgeStore {
        &self.pledges
    }

    /// Returns the time source.
    #[must_use]
    pub const fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Processes one submission.
    ///
    /// # Errors
    ///
    /// Returns the first [`SubmissionError`] hit by the pipeline.
    pub fn submit(
        &self,
        request: &SubmissionRequest<'_>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        if request.method != SUBMIT_METHOD {
            return Err(SubmissionError::InvalidMethod(request.method.to_string()));
        }
        let now = self.clock.now();
        if !self.limiter.check(request.client_address, now)?.is_admitted() {
            return Err(SubmissionError::RateLimited);
        }
        let issues = validate_submission(request.form);
        if !issues.is_empty() {
            return Err(SubmissionError::ValidationFailed(issues));
        }
        let clean = sanitize_submission(request.form);
        self.pledges.ensure_ready()?;
        let pledge = NewPledge::from_sanitized(clean, request.client_address, now);
        match self.pledges.insert_unique(&pledge) {
            Ok(pledge_id) => Ok(SubmissionReceipt {
                pledge_id,
            }),
            Err(InsertError::Duplicate) => Err(SubmissionError::DuplicatePledge),
            Err(InsertError::Store(err)) => {
                Err(SubmissionError::PersistenceFailed(err.to_string()))
            }
        }
    }

    /// Closes both stores.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] from the first store that fails to close.
    pub fn close(&self) -> Result<(), StoreError> {
        self.pledges.close()?;
        self.limiter.close()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
