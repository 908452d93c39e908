// crates/pledge-registry-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures for submission pipeline tests.
// Purpose: Build services over in-memory stores and a manual clock.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::sync::Arc;

use pledge_registry_core::InMemoryPledgeStore;
use pledge_registry_core::InMemoryRateLimitStore;
use pledge_registry_core::ManualClock;
use pledge_registry_core::RateLimitPolicy;
use pledge_registry_core::RateLimiter;
use pledge_registry_core::SharedClock;
use pledge_registry_core::SharedPledgeStore;
use pledge_registry_core::SharedRateLimitStore;
use pledge_registry_core::SubmissionForm;
use pledge_registry_core::SubmissionRequest;
use pledge_registry_core::SubmissionService;
use pledge_registry_core::Timestamp;

/// Fixed start time for deterministic tests (2023-11-14T22:13:20Z).
pub const START: i64 = 1_700_000_000;

/// Client address used when a test does not care which one.
pub const CLIENT: &str = "198.51.100.7";

/// Service plus handles on its in-memory collaborators.
pub struct Harness {
    /// Service under test.
    pub service: SubmissionService,
    /// Backing pledge store.
    pub pledges: InMemoryPledgeStore,
    /// Backing rate-limit ledger.
    pub ledger: InMemoryRateLimitStore,
    /// Controllable clock.
    pub clock: Arc<ManualClock>,
}

/// Builds a harness with the default policy.
pub fn harness() -> Harness {
    harness_with_policy(RateLimitPolicy::default())
}

/// Builds a harness with an explicit rate-limit policy.
pub fn harness_with_policy(policy: RateLimitPolicy) -> Harness {
    let pledges = InMemoryPledgeStore::new();
    let ledger = InMemoryRateLimitStore::new();
    let clock = Arc::new(ManualClock::new(Timestamp::from_unix_seconds(START)));
    let shared_clock: SharedClock = clock.clone();
    let service = SubmissionService::new(
        SharedPledgeStore::from_store(pledges.clone()),
        RateLimiter::new(policy, SharedRateLimitStore::from_store(ledger.clone())),
        shared_clock,
    );
    Harness {
        service,
        pledges,
        ledger,
        clock,
    }
}

/// Returns a valid form for `company` and `email`.
pub fn valid_form(company: &str, email: &str) -> SubmissionForm {
    SubmissionForm::new()
        .with("company_name", company)
        .with("contact_name", "Jo")
        .with("email", email)
        .with("agree", "1")
}

/// Builds a `POST` request from `address`.
pub fn post<'a>(form: &'a SubmissionForm, address: &'a str) -> SubmissionRequest<'a> {
    SubmissionRequest {
        method: "POST",
        form,
        client_address: address,
    }
}
