// crates/pledge-registry-core/src/core/pledge.rs
// ============================================================================
// Module: Pledge Records
// Description: Persisted pledge records, insert payloads, and dashboard stats.
// Purpose: Define the single-table data model shared by every store.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! A [`Pledge`] is created once by a successful submission and never updated
//! or deleted by the registry. Uniqueness of `email` and `company_name` is a
//! store-level guarantee; see [`crate::interfaces::PledgeStore`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::clock::Timestamp;
use crate::core::sanitize::SanitizedSubmission;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Length of the "this week" dashboard window in seconds.
const WEEK_SECONDS: i64 = 7 * 24 * 60 * 60;

// ============================================================================
// SECTION: Identifiers
// ============================================================================

/// Sequential pledge identifier assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PledgeId(i64);

impl PledgeId {
    /// Wraps a raw store identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// Persisted pledge record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pledge {
    /// Store-assigned identifier.
    pub id: PledgeId,
    /// HTML-escaped company name.
    pub company_name: String,
    /// HTML-escaped contact name.
    pub contact_name: String,
    /// Lowercased, trimmed email.
    pub email: String,
    /// HTML-escaped title; empty when not provided.
    pub title: String,
    /// Trimmed website URL; empty when not provided.
    pub website: String,
    /// Client address recorded for information only.
    pub ip_address: String,
    /// Server-assigned creation time.
    pub created_at: Timestamp,
}

/// Pledge payload handed to a store for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPledge {
    /// HTML-escaped company name.
    pub company_name: String,
    /// HTML-escaped contact name.
    pub contact_name: String,
    /// Lowercased, trimmed email.
    pub email: String,
    /// HTML-escaped title; empty when not provided.
    pub title: String,
    /// Trimmed website URL; empty when not provided.
    pub website: String,
    /// Client address recorded for information only.
    pub ip_address: String,
    /// Server-assigned creation time.
    pub created_at: Timestamp,
}

impl NewPledge {
    /// Builds an insert payload from sanitized input.
    #[must_use]
    pub fn from_sanitized(
        input: SanitizedSubmission,
        ip_address: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            company_name: input.company_name,
            contact_name: input.contact_name,
            email: input.email,
            title: input.title,
            website: input.website,
            ip_address: ip_address.into(),
            created_at,
        }
    }

    /// Materializes the stored record once the store assigns an id.
    #[must_use]
    pub fn into_pledge(self, id: PledgeId) -> Pledge {
        Pledge {
            id,
            company_name: self.company_name,
            contact_name: self.contact_name,
            email: self.email,
            title: self.title,
            website: self.website,
            ip_address: self.ip_address,
            created_at: self.created_at,
        }
    }
}

// ============================================================================
// SECTION: Stats
// ============================================================================

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PledgeStats {
    /// Total pledges.
    pub total: u64,
    /// Pledges created in the current UTC calendar month.
    pub this_month: u64,
    /// Pledges created within the last seven days.
    pub this_week: u64,
}

impl PledgeStats {
    /// Computes dashboard counts for `pledges` relative to `now`.
    #[must_use]
    pub fn from_pledges(pledges: &[Pledge], now: Timestamp) -> Self {
        let current_month = now.to_datetime().map(|value| (value.year(), value.month()));
        let week_start = now.offset_by(-WEEK_SECONDS);
        let mut stats = Self::default();
        for pledge in pledges {
            stats.total += 1;
            let month = pledge.created_at.to_datetime().map(|value| (value.year(), value.month()));
            if month.is_some() && month == current_month {
                stats.this_month += 1;
            }
            if pledge.created_at >= week_start {
                stats.this_week += 1;
            }
        }
        stats
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
