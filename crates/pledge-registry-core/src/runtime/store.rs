// crates/pledge-registry-core/src/runtime/store.rs
// ============================================================================
// Module: Pledge Registry In-Memory Stores
// Description: In-memory pledge and rate-limit stores plus shared wrappers.
// Purpose: Provide deterministic stores for tests and ephemeral deployments.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! [`InMemoryPledgeStore`] and [`InMemoryRateLimitStore`] keep all state in a
//! mutex-guarded map and lose it on restart. The `Shared*` wrappers erase the
//! concrete backend behind an `Arc` so the runtime can hold any store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use crate::core::NewPledge;
use crate::core::Pledge;
use crate::core::PledgeId;
use crate::interfaces::InsertError;
use crate::interfaces::LedgerCommit;
use crate::interfaces::PledgeStore;
use crate::interfaces::RateLimitLedger;
use crate::interfaces::RateLimitStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: In-Memory Pledge Store
// ============================================================================

/// Mutable state behind [`InMemoryPledgeStore`].
#[derive(Debug, Default)]
struct PledgeTable {
    /// Rows in insertion order.
    rows: Vec<Pledge>,
    /// Last assigned identifier.
    last_id: i64,
}

/// In-memory pledge store for tests and ephemeral runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPledgeStore {
    /// Table protected by a mutex.
    table: Arc<Mutex<PledgeTable>>,
}

impl InMemoryPledgeStore {
    /// Creates an empty in-memory pledge store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the table.
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, PledgeTable>, StoreError> {
        self.table
            .lock()
            .map_err(|_| StoreError::Unavailable("pledge store mutex poisoned".to_string()))
    }
}

impl PledgeStore for InMemoryPledgeStore {
    fn ensure_ready(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }

    fn insert_unique(&self, pledge: &NewPledge) -> Result<PledgeId, InsertError> {
        let mut table = self.lock()?;
        let conflict = table
            .rows
            .iter()
            .any(|row| row.email == pledge.email || row.company_name == pledge.company_name);
        if conflict {
            return Err(InsertError::Duplicate);
        }
        table.last_id += 1;
        let id = PledgeId::new(table.last_id);
        table.rows.push(pledge.clone().into_pledge(id));
        drop(table);
        Ok(id)
    }

    fn count(&self) -> Result<u64, StoreError> {
        let table = self.lock()?;
        Ok(u64::try_from(table.rows.len()).unwrap_or(u64::MAX))
    }

    fn list_newest_first(&self) -> Result<Vec<Pledge>, StoreError> {
        let mut rows = self.lock()?.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(rows)
    }

    fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ============================================================================
// SECTION: In-Memory Rate Limit Store
// ============================================================================

/// In-memory rate-limit ledger.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRateLimitStore {
    /// Ledger protected by a mutex.
    ledger: Arc<Mutex<RateLimitLedger>>,
}

impl InMemoryRateLimitStore {
    /// Creates an empty in-memory ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the ledger mutex is poisoned.
    pub fn snapshot(&self) -> Result<RateLimitLedger, StoreError> {
        self.ledger
            .lock()
            .map(|guard| guard.clone())
            .map_err(|_| StoreError::Unavailable("rate limit store mutex poisoned".to_string()))
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    fn transact(
        &self,
        operation: &mut dyn FnMut(&mut RateLimitLedger) -> LedgerCommit,
    ) -> Result<(), StoreError> {
        let mut guard = self
            .ledger
            .lock()
            .map_err(|_| StoreError::Unavailable("rate limit store mutex poisoned".to_string()))?;
        let mut working = guard.clone();
        if operation(&mut working) == LedgerCommit::Persist {
            *guard = working;
        }
        drop(guard);
        Ok(())
    }
}

// ============================================================================
// SECTION: Shared Store Wrappers
// ============================================================================

/// Shared pledge store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedPledgeStore {
    /// Inner store implementation.
    inner: Arc<dyn PledgeStore + Send + Sync>,
}

impl SharedPledgeStore {
    /// Wraps a pledge store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl PledgeStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn PledgeStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl PledgeStore for SharedPledgeStore {
    fn ensure_ready(&self) -> Result<(), StoreError> {
        self.inner.ensure_ready()
    }

    fn insert_unique(&self, pledge: &NewPledge) -> Result<PledgeId, InsertError> {
        self.inner.insert_unique(pledge)
    }

    fn count(&self) -> Result<u64, StoreError> {
        self.inner.count()
    }

    fn list_newest_first(&self) -> Result<Vec<Pledge>, StoreError> {
        self.inner.list_newest_first()
    }

    fn close(&self) -> Result<(), StoreError> {
        self.inner.close()
    }
}

/// Shared rate-limit store backed by an `Arc` trait object.
#[derive(Clone)]
pub struct SharedRateLimitStore {
    /// Inner store implementation.
    inner: Arc<dyn RateLimitStore + Send + Sync>,
}

impl SharedRateLimitStore {
    /// Wraps a rate-limit store in a shared, clonable wrapper.
    #[must_use]
    pub fn from_store(store: impl RateLimitStore + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// Wraps an existing shared store.
    #[must_use]
    pub const fn new(store: Arc<dyn RateLimitStore + Send + Sync>) -> Self {
        Self {
            inner: store,
        }
    }
}

impl RateLimitStore for SharedRateLimitStore {
    fn transact(
        &self,
        operation: &mut dyn FnMut(&mut RateLimitLedger) -> LedgerCommit,
    ) -> Result<(), StoreError> {
        self.inner.transact(operation)
    }

    fn close(&self) -> Result<(), StoreError> {
        self.inner.close()
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
