// crates/pledge-registry-store-sqlite/src/ledger.rs
// ============================================================================
// Module: File Rate-Limit Ledger
// Description: JSON map of rate-limit entries persisted in a single file.
// Purpose: Share rate-limit state across processes on one host.
// Dependencies: pledge-registry-core, serde_json, tempfile
// ============================================================================

//! ## Overview
//! [`FileRateLimitStore`] stores the ledger as a JSON object of
//! `key -> unix seconds`. Each transaction holds an in-process mutex and an
//! exclusive OS lock on a sidecar `<path>.lock` file while it reads the map,
//! runs the caller's mutation, and (on persist) writes a temporary file in
//! the same directory that is renamed over the ledger.
//!
//! A missing ledger reads as empty. An unreadable, oversized, or malformed
//! ledger also reads as empty and is replaced on the next persist. Every such
//! reset is reported to the hook installed with
//! [`FileRateLimitStore::with_reset_hook`] so operators can see that quotas
//! were cleared.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ffi::OsString;
use std::fmt;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use pledge_registry_core::LedgerCommit;
use pledge_registry_core::RateLimitLedger;
use pledge_registry_core::RateLimitStore;
use pledge_registry_core::StoreError;
use tempfile::NamedTempFile;

use crate::paths::ensure_parent_dir;
use crate::paths::parent_dir;
use crate::paths::validate_store_path;
use crate::store::SqliteStoreError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum ledger file size read back from disk.
pub const MAX_LEDGER_BYTES: u64 = 4 * 1024 * 1024;
/// Suffix appended to the ledger path for the lock file.
const LOCK_SUFFIX: &str = ".lock";

// ============================================================================
// SECTION: Store
// ============================================================================

/// Callback invoked with a reason whenever an unusable ledger is reset.
pub type LedgerResetHook = Arc<dyn Fn(&str) + Send + Sync>;

/// File-backed rate-limit ledger.
pub struct FileRateLimitStore {
    /// Ledger file path.
    path: PathBuf,
    /// Sidecar lock file path.
    lock_path: PathBuf,
    /// Serializes transactions within this process.
    local: Mutex<()>,
    /// Receives ledger reset reasons.
    on_reset: Option<LedgerResetHook>,
}

impl fmt::Debug for FileRateLimitStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileRateLimitStore")
            .field("path", &self.path)
            .field("lock_path", &self.lock_path)
            .field("on_reset", &self.on_reset.is_some())
            .finish_non_exhaustive()
    }
}

impl FileRateLimitStore {
    /// Creates a ledger store at `path` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError::Invalid`] when the path violates limits.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, SqliteStoreError> {
        let path = path.into();
        validate_store_path(&path)?;
        let mut lock_name = OsString::from(path.as_os_str());
        lock_name.push(LOCK_SUFFIX);
        Ok(Self {
            lock_path: PathBuf::from(lock_name),
            path,
            local: Mutex::new(()),
            on_reset: None,
        })
    }

    /// Installs a hook that is told why an unusable ledger was reset.
    #[must_use]
    pub fn with_reset_hook(mut self, hook: LedgerResetHook) -> Self {
        self.on_reset = Some(hook);
        self
    }

    /// Returns the ledger file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the sidecar lock file path.
    #[must_use]
    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Runs one locked read-modify-write cycle.
    fn transact_locked(
        &self,
        operation: &mut dyn FnMut(&mut RateLimitLedger) -> LedgerCommit,
    ) -> Result<(), SqliteStoreError> {
        let local =
            self.local.lock().map_err(|_| SqliteStoreError::Io("mutex poisoned".to_string()))?;
        ensure_parent_dir(&self.path)?;
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&self.lock_path)
            .map_err(|err| SqliteStoreError::Io(format!("open ledger lock: {err}")))?;
        lock_file.lock().map_err(|err| SqliteStoreError::Io(format!("lock ledger: {err}")))?;
        let outcome = self.read_modify_write(operation);
        let unlocked = lock_file.unlock();
        drop(local);
        outcome?;
        unlocked.map_err(|err| SqliteStoreError::Io(format!("unlock ledger: {err}")))
    }

    /// Loads the ledger, applies `operation`, and persists when requested.
    fn read_modify_write(
        &self,
        operation: &mut dyn FnMut(&mut RateLimitLedger) -> LedgerCommit,
    ) -> Result<(), SqliteStoreError> {
        let (mut ledger, reset) = read_ledger(&self.path)?;
        if let (Some(reason), Some(hook)) = (reset, &self.on_reset) {
            hook(&reason);
        }
        if operation(&mut ledger) == LedgerCommit::Persist {
            write_ledger(&self.path, &ledger)?;
        }
        Ok(())
    }
}

impl RateLimitStore for FileRateLimitStore {
    fn transact(
        &self,
        operation: &mut dyn FnMut(&mut RateLimitLedger) -> LedgerCommit,
    ) -> Result<(), StoreError> {
        self.transact_locked(operation).map_err(StoreError::from)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the ledger, treating absent or unusable content as empty.
///
/// The second value carries the reason when existing content was discarded.
fn read_ledger(path: &Path) -> Result<(RateLimitLedger, Option<String>), SqliteStoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok((RateLimitLedger::new(), None)),
        Err(err) => return Err(SqliteStoreError::Io(format!("open ledger: {err}"))),
    };
    let mut bytes = Vec::new();
    if let Err(err) = file.take(MAX_LEDGER_BYTES + 1).read_to_end(&mut bytes) {
        return Ok((RateLimitLedger::new(), Some(format!("ledger unreadable: {err}"))));
    }
    if !u64::try_from(bytes.len()).is_ok_and(|len| len <= MAX_LEDGER_BYTES) {
        let reason = format!("ledger exceeds {MAX_LEDGER_BYTES} bytes");
        return Ok((RateLimitLedger::new(), Some(reason)));
    }
    match serde_json::from_slice(&bytes) {
        Ok(ledger) => Ok((ledger, None)),
        Err(err) => Ok((RateLimitLedger::new(), Some(format!("ledger is not valid json: {err}")))),
    }
}

/// Atomically replaces the ledger with `ledger`.
fn write_ledger(path: &Path, ledger: &RateLimitLedger) -> Result<(), SqliteStoreError> {
    let bytes =
        serde_json::to_vec(ledger).map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
    let mut staged = NamedTempFile::new_in(parent_dir(path))
        .map_err(|err| SqliteStoreError::Io(format!("stage ledger: {err}")))?;
    staged
        .write_all(&bytes)
        .map_err(|err| SqliteStoreError::Io(format!("write ledger: {err}")))?;
    staged
        .as_file()
        .sync_all()
        .map_err(|err| SqliteStoreError::Io(format!("sync ledger: {err}")))?;
    staged
        .persist(path)
        .map_err(|err| SqliteStoreError::Io(format!("replace ledger: {}", err.error)))?;
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
