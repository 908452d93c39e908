// crates/pledge-registry-core/src/runtime/rate_limit.rs
// ============================================================================
// Module: Submission Rate Limiter
// Description: Sliding-window cap on admitted submissions per client address.
// Purpose: Throttle repeated submissions from one address.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Each admitted attempt is recorded in the ledger under
//! `<fingerprint>_<unix seconds>` (plus `_<n>` when the same address is
//! admitted twice within one second). On every check the ledger is pruned
//! of entries at least `window_seconds` old, the surviving entries for the
//! caller are counted, and the attempt is admitted only while that count is
//! below `max_submissions`.
//!
//! ## Invariants
//! - Denied attempts are never recorded and never persist the pruning.
//! - The whole read-prune-count-append cycle runs inside one
//!   [`RateLimitStore::transact`](crate::interfaces::RateLimitStore::transact).

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::Timestamp;
use crate::core::client_fingerprint;
use crate::interfaces::LedgerCommit;
use crate::interfaces::RateLimitLedger;
use crate::interfaces::RateLimitStore;
use crate::interfaces::StoreError;
use crate::runtime::store::SharedRateLimitStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default rolling window (one hour).
pub const DEFAULT_WINDOW_SECONDS: i64 = 3_600;
/// Default admitted submissions per window per address.
pub const DEFAULT_MAX_SUBMISSIONS: usize = 5;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Rate-limit policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Rolling window length in seconds.
    pub window_seconds: i64,
    /// Maximum admitted submissions per address inside the window.
    pub max_submissions: usize,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self {
            window_seconds: DEFAULT_WINDOW_SECONDS,
            max_submissions: DEFAULT_MAX_SUBMISSIONS,
        }
    }
}

/// Rate-limit outcome for one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Attempt admitted and recorded under `key`.
    Admitted {
        /// Ledger key recorded for this attempt.
        key: String,
    },
    /// Attempt denied; nothing recorded.
    Denied {
        /// Entries already inside the window for this address.
        recent: usize,
    },
}

impl RateLimitDecision {
    /// Returns true when the attempt was admitted.
    #[must_use]
    pub const fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted { .. })
    }
}

// ============================================================================
// SECTION: Policy Application
// ============================================================================

/// Applies `policy` to `ledger` for the address behind `fingerprint`.
///
/// Prunes expired entries, counts the caller's live entries, and appends a
/// new entry when admitting. Callers decide whether to persist.
pub fn apply_policy(
    ledger: &mut RateLimitLedger,
    policy: &RateLimitPolicy,
    fingerprint: &str,
    now: Timestamp,
) -> RateLimitDecision {
    let now_seconds = now.as_unix_seconds();
    ledger.retain(|_, recorded| {
        now.seconds_since(Timestamp::from_unix_seconds(*recorded)) < policy.window_seconds
    });
    let prefix = format!("{fingerprint}_");
    let recent = ledger.keys().filter(|key| key.starts_with(&prefix)).count();
    if recent >= policy.max_submissions {
        return RateLimitDecision::Denied {
            recent,
        };
    }
    let base = format!("{prefix}{now_seconds}");
    let mut key = base.clone();
    let mut suffix: u32 = 1;
    while ledger.contains_key(&key) {
        key = format!("{base}_{suffix}");
        suffix = suffix.saturating_add(1);
    }
    ledger.insert(key.clone(), now_seconds);
    RateLimitDecision::Admitted {
        key,
    }
}

// ============================================================================
// SECTION: Rate Limiter
// ============================================================================

/// Rate limiter bound to a ledger store.
#[derive(Clone)]
pub struct RateLimiter {
    /// Active policy.
    policy: RateLimitPolicy,
    /// Ledger storage.
    store: SharedRateLimitStore,
}

impl RateLimiter {
    /// Creates a rate limiter over `store`.
    #[must_use]
    pub const fn new(policy: RateLimitPolicy, store: SharedRateLimitStore) -> Self {
        Self {
            policy,
            store,
        }
    }

    /// Decides whether `address` may submit at `now`, recording admissions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the ledger transaction fails.
    pub fn check(&self, address: &str, now: Timestamp) -> Result<RateLimitDecision, StoreError> {
        let fingerprint = client_fingerprint(address);
        let mut decision = None;
        self.store.transact(&mut |ledger| {
            let outcome = apply_policy(ledger, &self.policy, &fingerprint, now);
            let commit =
                if outcome.is_admitted() { LedgerCommit::Persist } else { LedgerCommit::Discard };
            decision = Some(outcome);
            commit
        })?;
        decision
            .ok_or_else(|| StoreError::Invalid("rate limit transaction did not run".to_string()))
    }

    /// Closes the ledger store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store fails to close.
    pub fn close(&self) -> Result<(), StoreError> {
        self.store.close()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
