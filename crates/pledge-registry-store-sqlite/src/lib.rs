// crates/pledge-registry-store-sqlite/src/lib.rs
// ============================================================================
// Module: Pledge Registry Durable Stores
// Description: SQLite pledge table and file-backed rate-limit ledger.
// Purpose: Provide production persistence for the pledge registry.
// Dependencies: pledge-registry-core, rusqlite, serde_json, tempfile
// ============================================================================

//! ## Overview
//! This crate provides the two durable backends the registry needs:
//! [`SqlitePledgeStore`] persists pledges in a single `SQLite` table with
//! unique indexes on email and company name, and [`FileRateLimitStore`]
//! keeps the rate-limit ledger as a JSON map guarded by an exclusive lock
//! and replaced atomically on every write.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod ledger;
mod paths;
pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use ledger::FileRateLimitStore;
pub use ledger::LedgerResetHook;
pub use ledger::MAX_LEDGER_BYTES;
pub use store::SqlitePledgeStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
