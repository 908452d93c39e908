// crates/pledge-registry-config/src/lib.rs
// ============================================================================
// Module: Pledge Registry Config Library
// Description: Canonical config model, validation, and example config.
// Purpose: Single source of truth for pledge-registry.toml semantics.
// Dependencies: pledge-registry-core, pledge-registry-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! `pledge-registry-config` defines the configuration model for the pledge
//! registry server and CLI. Config inputs are untrusted: loading enforces
//! size, encoding, and path limits and validation fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
