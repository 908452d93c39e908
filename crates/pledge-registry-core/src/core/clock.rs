// crates/pledge-registry-core/src/core/clock.rs
// ============================================================================
// Module: Pledge Registry Time
// Description: Second-resolution timestamps and injectable clocks.
// Purpose: Keep wall-clock reads behind a trait so tests control time.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! All time in the registry is whole unix seconds. The rate-limit window and
//! pledge `created_at` values are both expressed as [`Timestamp`]. Runtime
//! code never calls [`SystemTime::now`] directly; it asks a [`Clock`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

// ============================================================================
// SECTION: Timestamp
// ============================================================================

/// Unix timestamp in whole seconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix seconds.
    #[must_use]
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Returns the timestamp as unix seconds.
    #[must_use]
    pub const fn as_unix_seconds(self) -> i64 {
        self.0
    }

    /// Returns the number of seconds elapsed from `earlier` to `self`.
    #[must_use]
    pub const fn seconds_since(self, earlier: Self) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Returns a timestamp shifted by `seconds` (negative values move back).
    #[must_use]
    pub const fn offset_by(self, seconds: i64) -> Self {
        Self(self.0.saturating_add(seconds))
    }

    /// Converts to a UTC date-time, or `None` when out of the supported range.
    #[must_use]
    pub fn to_datetime(self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.0).ok()
    }

    /// Formats the timestamp as RFC 3339 (UTC), falling back to raw seconds.
    #[must_use]
    pub fn to_rfc3339(self) -> String {
        self.to_datetime()
            .and_then(|value| value.format(&Rfc3339).ok())
            .unwrap_or_else(|| self.0.to_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// SECTION: Clocks
// ============================================================================

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// Shared clock handle.
pub type SharedClock = Arc<dyn Clock>;

/// Clock backed by the operating system wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        Timestamp(i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Manually driven clock for tests and replay.
#[derive(Debug, Default)]
pub struct ManualClock {
    /// Current unix seconds.
    now: AtomicI64,
}

impl ManualClock {
    /// Creates a manual clock starting at `start`.
    #[must_use]
    pub const fn new(start: Timestamp) -> Self {
        Self {
            now: AtomicI64::new(start.0),
        }
    }

    /// Sets the current time.
    pub fn set(&self, now: Timestamp) {
        self.now.store(now.0, Ordering::SeqCst);
    }

    /// Moves the clock forward by `seconds`.
    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.load(Ordering::SeqCst))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only assertions."
    )]

    use super::Clock;
    use super::ManualClock;
    use super::Timestamp;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(Timestamp::from_unix_seconds(100));
        clock.advance(3_600);
        assert_eq!(clock.now(), Timestamp::from_unix_seconds(3_700));
        clock.set(Timestamp::from_unix_seconds(5));
        assert_eq!(clock.now().as_unix_seconds(), 5);
    }

    #[test]
    fn rfc3339_formats_epoch() {
        assert_eq!(Timestamp::from_unix_seconds(0).to_rfc3339(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn seconds_since_saturates() {
        let early = Timestamp::from_unix_seconds(i64::MIN);
        let late = Timestamp::from_unix_seconds(i64::MAX);
        assert_eq!(late.seconds_since(early), i64::MAX);
    }
}
