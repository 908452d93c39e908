// crates/pledge-registry-core/src/interfaces/mod.rs
// ============================================================================
// Module: Pledge Registry Interfaces
// Description: Storage interfaces for pledges and rate-limit bookkeeping.
// Purpose: Let the runtime stay backend-agnostic and testable with fakes.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Both persisted resources the registry touches are injected:
//! - [`PledgeStore`] owns the single `pledges` table, including the atomic
//!   duplicate-check-and-insert.
//! - [`RateLimitStore`] owns the key -> timestamp ledger and exposes it only
//!   through a locked read-modify-write transaction.
//!
//! Implementations must be safe to share across request handlers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::NewPledge;
use crate::core::Pledge;
use crate::core::PledgeId;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Storage errors shared by pledge and rate-limit stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Filesystem or directory failure.
    #[error("store io error: {0}")]
    Io(String),
    /// Database engine failure.
    #[error("store db error: {0}")]
    Db(String),
    /// Persisted data failed integrity checks.
    #[error("store corruption: {0}")]
    Corrupt(String),
    /// Persisted schema version is not supported.
    #[error("store version mismatch: {0}")]
    VersionMismatch(String),
    /// Input or persisted data is invalid.
    #[error("store invalid data: {0}")]
    Invalid(String),
    /// Store is closed or otherwise unavailable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failure modes of [`PledgeStore::insert_unique`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InsertError {
    /// A pledge with the same email or company name already exists.
    #[error("duplicate pledge")]
    Duplicate,
    /// The store failed while checking or inserting.
    #[error(transparent)]
    Store(#[from] StoreError),
}

// ============================================================================
// SECTION: Pledge Store
// ============================================================================

/// Persistent pledge table.
pub trait PledgeStore {
    /// Opens the backing store and creates the schema when absent.
    ///
    /// Idempotent; calling it on a ready store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store cannot be created or opened.
    fn ensure_ready(&self) -> Result<(), StoreError>;

    /// Inserts `pledge` unless a row with the same email or company name
    /// exists. The check and the insert are a single atomic operation.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::Duplicate`] on a uniqueness conflict and
    /// [`InsertError::Store`] on storage failure.
    fn insert_unique(&self, pledge: &NewPledge) -> Result<PledgeId, InsertError>;

    /// Returns the number of stored pledges; zero when the store was never
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn count(&self) -> Result<u64, StoreError>;

    /// Returns every pledge, newest first (id descending on ties).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn list_newest_first(&self) -> Result<Vec<Pledge>, StoreError>;

    /// Releases underlying resources. A later [`Self::ensure_ready`] reopens.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when shutdown fails.
    fn close(&self) -> Result<(), StoreError>;
}

// ============================================================================
// SECTION: Rate Limit Store
// ============================================================================

/// Rate-limit ledger: synthetic key -> unix seconds of the admitted attempt.
pub type RateLimitLedger = BTreeMap<String, i64>;

/// Outcome requested by a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerCommit {
    /// Persist the mutated ledger.
    Persist,
    /// Drop any in-memory changes.
    Discard,
}

/// Persistent rate-limit ledger guarded by an exclusive lock.
pub trait RateLimitStore {
    /// Runs `operation` against the current ledger while holding an exclusive
    /// lock, persisting the result when it returns [`LedgerCommit::Persist`].
    ///
    /// A missing ledger is presented as empty.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the ledger cannot be locked, read, or
    /// persisted.
    fn transact(
        &self,
        operation: &mut dyn FnMut(&mut RateLimitLedger) -> LedgerCommit,
    ) -> Result<(), StoreError>;

    /// Releases underlying resources.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when shutdown fails.
    fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
