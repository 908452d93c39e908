// crates/pledge-registry-core/src/runtime/count.rs
// ============================================================================
// Module: Pledge Count
// Description: Public pledge count lookup.
// Purpose: Report the number of pledges without ever failing the caller.
// Dependencies: crate::interfaces
// ============================================================================

//! ## Overview
//! The public counter degrades to zero on any storage failure. The failure
//! is handed to `on_error` so the caller can log it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::interfaces::PledgeStore;
use crate::interfaces::StoreError;

// ============================================================================
// SECTION: Count
// ============================================================================

/// Returns the stored pledge count, or zero after reporting a store failure.
pub fn count_pledges(store: &dyn PledgeStore, on_error: impl FnOnce(&StoreError)) -> u64 {
    match store.count() {
        Ok(total) => total,
        Err(err) => {
            on_error(&err);
            0
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
