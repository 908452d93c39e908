// crates/pledge-registry-core/tests/submission.rs
// ============================================================================
// Module: Submission Pipeline Tests
// Description: End-to-end tests for the submission service over fakes.
// Purpose: Pin pipeline order, duplicate handling, quota, and error mapping.
// Dependencies: pledge-registry-core, serde_json
// ============================================================================
//! ## Overview
//! Drives [`SubmissionService`] with in-memory stores and a manual clock.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::sync::Arc;

use common::CLIENT;
use common::START;
use common::harness;
use common::harness_with_policy;
use common::post;
use common::valid_form;
use pledge_registry_core::InMemoryRateLimitStore;
use pledge_registry_core::InsertError;
use pledge_registry_core::LedgerCommit;
use pledge_registry_core::ManualClock;
use pledge_registry_core::NewPledge;
use pledge_registry_core::Pledge;
use pledge_registry_core::PledgeId;
use pledge_registry_core::PledgeStore;
use pledge_registry_core::RateLimitLedger;
use pledge_registry_core::RateLimitPolicy;
use pledge_registry_core::RateLimitStore;
use pledge_registry_core::RateLimiter;
use pledge_registry_core::SharedPledgeStore;
use pledge_registry_core::SharedRateLimitStore;
use pledge_registry_core::StoreError;
use pledge_registry_core::SubmissionError;
use pledge_registry_core::SubmissionForm;
use pledge_registry_core::SubmissionRequest;
use pledge_registry_core::SubmissionResult;
use pledge_registry_core::SubmissionService;
use pledge_registry_core::Timestamp;
use pledge_registry_core::count_pledges;

// ============================================================================
// SECTION: Fakes
// ============================================================================

/// Pledge store that fails at a chosen step.
struct FailingPledgeStore {
    /// Fail `ensure_ready` instead of `insert_unique`.
    fail_ready: bool,
}

impl PledgeStore for FailingPledgeStore {
    fn ensure_ready(&self) -> Result<(), StoreError> {
        if self.fail_ready {
            return Err(StoreError::Io("cannot create /var/lib/pledges".to_string()));
        }
        Ok(())
    }

    fn insert_unique(&self, _pledge: &NewPledge) -> Result<PledgeId, InsertError> {
        Err(InsertError::Store(StoreError::Db("disk I/O error".to_string())))
    }

    fn count(&self) -> Result<u64, StoreError> {
        Err(StoreError::Db("disk I/O error".to_string()))
    }

    fn list_newest_first(&self) -> Result<Vec<Pledge>, StoreError> {
        Err(StoreError::Db("disk I/O error".to_string()))
    }

    fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Ledger store that cannot be locked.
struct LockedLedger;

impl RateLimitStore for LockedLedger {
    fn transact(
        &self,
        _operation: &mut dyn FnMut(&mut RateLimitLedger) -> LedgerCommit,
    ) -> Result<(), StoreError> {
        Err(StoreError::Io("lock file unwritable".to_string()))
    }
}

fn service_with(pledges: impl PledgeStore + Send + Sync + 'static) -> SubmissionService {
    SubmissionService::new(
        SharedPledgeStore::from_store(pledges),
        RateLimiter::new(
            RateLimitPolicy::default(),
            SharedRateLimitStore::from_store(InMemoryRateLimitStore::new()),
        ),
        Arc::new(ManualClock::new(Timestamp::from_unix_seconds(START))),
    )
}

// ============================================================================
// SECTION: Validation
// ============================================================================

#[test]
fn missing_fields_are_each_named() {
    let h = harness();
    let form = SubmissionForm::new().with("contact_name", "Jo").with("agree", "1");
    let err = h.service.submit(&post(&form, CLIENT)).unwrap_err();
    assert_eq!(err.kind(), "validation_failed");
    assert_eq!(err.public_message(), "Company name is required. Email is required.");
}

#[test]
fn malformed_email_fails_with_format_error() {
    let h = harness();
    let form = valid_form("Acme", "jo-at-acme.com");
    let err = h.service.submit(&post(&form, CLIENT)).unwrap_err();
    assert_eq!(err.public_message(), "Please enter a valid email address.");
}

#[test]
fn honeypot_fails_otherwise_valid_submission() {
    let h = harness();
    let form = valid_form("Acme", "jo@acme.com").with("honeypot", "x");
    let err = h.service.submit(&post(&form, CLIENT)).unwrap_err();
    assert_eq!(err.public_message(), "Spam detected.");
    assert_eq!(h.pledges.count().unwrap(), 0);
}

// ============================================================================
// SECTION: Duplicates
// ============================================================================

#[test]
fn duplicate_email_or_company_is_rejected() {
    let h = harness();
    h.service.submit(&post(&valid_form("Acme", "jo@acme.com"), CLIENT)).unwrap();

    let same_email = valid_form("Other", "jo@acme.com");
    let err = h.service.submit(&post(&same_email, CLIENT)).unwrap_err();
    assert_eq!(err, SubmissionError::DuplicatePledge);
    let result = SubmissionResult::from_outcome(&Err(err));
    assert!(!result.success);
    assert!(result.message.ends_with("already been submitted."));

    let same_company = valid_form("Acme", "someone@else.com");
    assert_eq!(
        h.service.submit(&post(&same_company, CLIENT)),
        Err(SubmissionError::DuplicatePledge)
    );
    assert_eq!(h.pledges.count().unwrap(), 1);
}

#[test]
fn duplicate_email_is_detected_after_normalization() {
    let h = harness();
    h.service.submit(&post(&valid_form("Acme", "jo@acme.com"), CLIENT)).unwrap();
    let shouted = valid_form("Other", "  JO@Acme.COM ");
    assert_eq!(h.service.submit(&post(&shouted, CLIENT)), Err(SubmissionError::DuplicatePledge));
}

// ============================================================================
// SECTION: Rate Limiting
// ============================================================================

#[test]
fn sixth_submission_within_window_is_rate_limited() {
    let h = harness();
    for n in 0 .. 5 {
        let form = valid_form(&format!("Company {n}"), &format!("jo{n}@acme.com"));
        h.service.submit(&post(&form, CLIENT)).unwrap();
        h.clock.advance(60);
    }
    h.clock.set(Timestamp::from_unix_seconds(START + 3_599));
    let form = valid_form("Company 6", "jo6@acme.com");
    assert_eq!(h.service.submit(&post(&form, CLIENT)), Err(SubmissionError::RateLimited));

    h.clock.set(Timestamp::from_unix_seconds(START + 3_600 + 5 * 60));
    h.service.submit(&post(&form, CLIENT)).unwrap();
}

#[test]
fn other_addresses_are_unaffected() {
    let h = harness_with_policy(RateLimitPolicy {
        window_seconds: 3_600,
        max_submissions: 1,
    });
    h.service.submit(&post(&valid_form("A", "a@a.com"), "10.0.0.1")).unwrap();
    h.service.submit(&post(&valid_form("B", "b@b.com"), "10.0.0.2")).unwrap();
}

#[test]
fn rejected_submissions_after_admission_still_consume_quota() {
    let h = harness();
    let invalid = SubmissionForm::new();
    for _ in 0 .. 5 {
        let err = h.service.submit(&post(&invalid, CLIENT)).unwrap_err();
        assert_eq!(err.kind(), "validation_failed");
    }
    let valid = valid_form("Acme", "jo@acme.com");
    assert_eq!(h.service.submit(&post(&valid, CLIENT)), Err(SubmissionError::RateLimited));
}

#[test]
fn denied_attempts_do_not_extend_the_window() {
    let h = harness_with_policy(RateLimitPolicy {
        window_seconds: 100,
        max_submissions: 1,
    });
    h.service.submit(&post(&valid_form("A", "a@a.com"), CLIENT)).unwrap();
    for _ in 0 .. 3 {
        h.clock.advance(30);
        let form = valid_form("B", "b@b.com");
        assert_eq!(h.service.submit(&post(&form, CLIENT)), Err(SubmissionError::RateLimited));
    }
    h.clock.advance(10);
    h.service.submit(&post(&valid_form("B", "b@b.com"), CLIENT)).unwrap();
    assert_eq!(h.ledger.snapshot().unwrap().len(), 1);
}

#[test]
fn wrong_method_is_rejected_before_rate_limiting() {
    let h = harness();
    let form = valid_form("Acme", "jo@acme.com");
    let request = SubmissionRequest {
        method: "GET",
        form: &form,
        client_address: CLIENT,
    };
    let err = h.service.submit(&request).unwrap_err();
    assert_eq!(err.public_message(), "Invalid request method");
    assert!(h.ledger.snapshot().unwrap().is_empty());
}

// ============================================================================
// SECTION: Persistence
// ============================================================================

#[test]
fn stored_pledge_is_sanitized_and_stamped() {
    let h = harness();
    let form = valid_form(" <Acme> ", " Jo@Acme.com ")
        .with("title", "CTO & Founder")
        .with("website", " https://acme.com ");
    let receipt = h.service.submit(&post(&form, "203.0.113.5")).unwrap();
    let stored = h.pledges.list_newest_first().unwrap();
    assert_eq!(stored.len(), 1);
    let pledge = &stored[0];
    assert_eq!(pledge.id, receipt.pledge_id);
    assert_eq!(pledge.company_name, "&lt;Acme&gt;");
    assert_eq!(pledge.email, "jo@acme.com");
    assert_eq!(pledge.title, "CTO &amp; Founder");
    assert_eq!(pledge.website, "https://acme.com");
    assert_eq!(pledge.ip_address, "203.0.113.5");
    assert_eq!(pledge.created_at, Timestamp::from_unix_seconds(START));
}

#[test]
fn count_tracks_distinct_successes() {
    let h = harness();
    assert_eq!(count_pledges(&h.pledges, |_| {}), 0);
    for n in 0 .. 3 {
        let form = valid_form(&format!("Company {n}"), &format!("jo{n}@acme.com"));
        h.service.submit(&post(&form, &format!("10.0.0.{n}"))).unwrap();
    }
    let duplicate = valid_form("Company 0", "new@acme.com");
    assert!(h.service.submit(&post(&duplicate, "10.0.0.9")).is_err());
    assert_eq!(count_pledges(&h.pledges, |_| {}), 3);
}

#[test]
fn readiness_failure_maps_to_internal_error() {
    let service = service_with(FailingPledgeStore {
        fail_ready: true,
    });
    let err = service.submit(&post(&valid_form("Acme", "jo@acme.com"), CLIENT)).unwrap_err();
    assert_eq!(err.kind(), "internal_error");
    assert_eq!(err.public_message(), "An internal error occurred. Please try again later.");
    assert!(err.to_string().contains("/var/lib/pledges"));
}

#[test]
fn insert_failure_maps_to_persistence_failed() {
    let service = service_with(FailingPledgeStore {
        fail_ready: false,
    });
    let err = service.submit(&post(&valid_form("Acme", "jo@acme.com"), CLIENT)).unwrap_err();
    assert_eq!(err.kind(), "persistence_failed");
    assert_eq!(err.public_message(), "Failed to save pledge. Please try again.");
}

#[test]
fn ledger_failure_maps_to_internal_error() {
    let service = SubmissionService::new(
        SharedPledgeStore::from_store(FailingPledgeStore {
            fail_ready: false,
        }),
        RateLimiter::new(
            RateLimitPolicy::default(),
            SharedRateLimitStore::from_store(LockedLedger),
        ),
        Arc::new(ManualClock::new(Timestamp::from_unix_seconds(START))),
    );
    let err = service.submit(&post(&valid_form("Acme", "jo@acme.com"), CLIENT)).unwrap_err();
    assert_eq!(err.kind(), "internal_error");
}

#[test]
fn result_serializes_to_success_and_message() {
    let h = harness();
    let outcome = h.service.submit(&post(&valid_form("Acme", "jo@acme.com"), CLIENT));
    let json = serde_json::to_value(SubmissionResult::from_outcome(&outcome)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"success": true, "message": "Pledge submitted successfully!"})
    );
}
