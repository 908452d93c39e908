// crates/pledge-registry-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Pledge Store
// Description: Durable PledgeStore backed by a single SQLite table.
// Purpose: Persist pledges with atomic duplicate detection.
// Dependencies: pledge-registry-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! [`SqlitePledgeStore`] opens its database lazily. Read paths report an
//! empty table while the database file does not exist yet, so the public
//! count never creates files. [`PledgeStore::ensure_ready`] creates the
//! parent directory, the database, and the schema.
//!
//! Duplicate detection runs inside one `BEGIN IMMEDIATE` transaction, and
//! unique indexes on `email` and `company_name` turn any remaining race into
//! a constraint violation that is reported as a duplicate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use pledge_registry_core::InsertError;
use pledge_registry_core::NewPledge;
use pledge_registry_core::Pledge;
use pledge_registry_core::PledgeId;
use pledge_registry_core::PledgeStore;
use pledge_registry_core::StoreError;
use pledge_registry_core::Timestamp;
use rusqlite::Connection;
use rusqlite::ErrorCode;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::TransactionBehavior;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

use crate::paths::ensure_parent_dir;
use crate::paths::validate_store_path;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode.
    #[default]
    Wal,
    /// Delete journal mode.
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode.
    #[default]
    Full,
    /// Normal synchronous mode.
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` pledge store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl SqliteStoreConfig {
    /// Returns a config for `path` with default tuning.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Durable store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Persisted data failed integrity checks.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store configuration or data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Db(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Result of an insert attempt.
enum InsertOutcome {
    /// Row inserted with the assigned id.
    Inserted(PledgeId),
    /// Email or company name already present.
    Duplicate,
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed pledge store.
#[derive(Clone)]
pub struct SqlitePledgeStore {
    /// Store configuration.
    config: SqliteStoreConfig,
    /// Lazily opened connection guarded by a mutex.
    connection: Arc<Mutex<Option<Connection>>>,
}

impl SqlitePledgeStore {
    /// Creates a pledge store for `config` without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError::Invalid`] when the path violates limits.
    pub fn new(config: SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        Ok(Self {
            config,
            connection: Arc::new(Mutex::new(None)),
        })
    }

    /// Locks the connection slot.
    fn lock(&self) -> Result<MutexGuard<'_, Option<Connection>>, SqliteStoreError> {
        self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))
    }

    /// Opens the database into `slot` when it is not open yet.
    fn open_into<'a>(
        &self,
        slot: &'a mut Option<Connection>,
    ) -> Result<&'a mut Connection, SqliteStoreError> {
        if slot.is_none() {
            ensure_parent_dir(&self.config.path)?;
            let mut connection = open_connection(&self.config)?;
            initialize_schema(&mut connection)?;
            *slot = Some(connection);
        }
        slot.as_mut().ok_or_else(|| SqliteStoreError::Db("connection unavailable".to_string()))
    }

    /// Runs `read` against the database, or returns `absent` when the
    /// database has never been created.
    fn read<T>(
        &self,
        absent: T,
        read: impl FnOnce(&Connection) -> Result<T, SqliteStoreError>,
    ) -> Result<T, SqliteStoreError> {
        let mut guard = self.lock()?;
        if guard.is_none() && !self.config.path.exists() {
            return Ok(absent);
        }
        let connection = self.open_into(&mut guard)?;
        let value = read(connection)?;
        drop(guard);
        Ok(value)
    }

    /// Performs the duplicate check and insert in one immediate transaction.
    fn insert_row(&self, pledge: &NewPledge) -> Result<InsertOutcome, SqliteStoreError> {
        let mut guard = self.lock()?;
        let connection = self.open_into(&mut guard)?;
        let tx = connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        let existing: Option<i64> = tx
            .query_row(
                "SELECT id FROM pledges WHERE email = ?1 OR company_name = ?2 LIMIT 1",
                params![pledge.email, pledge.company_name],
                |row| row.get(0),
            )
            .optional()
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        if existing.is_some() {
            return Ok(InsertOutcome::Duplicate);
        }
        let inserted = tx.execute(
            "INSERT INTO pledges (company_name, contact_name, email, title, website, ip_address, \
             created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                pledge.company_name,
                pledge.contact_name,
                pledge.email,
                pledge.title,
                pledge.website,
                pledge.ip_address,
                pledge.created_at.as_unix_seconds(),
            ],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(failure, _))
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                return Ok(InsertOutcome::Duplicate);
            }
            Err(err) => return Err(SqliteStoreError::Db(err.to_string())),
        }
        let id = tx.last_insert_rowid();
        tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        drop(guard);
        Ok(InsertOutcome::Inserted(PledgeId::new(id)))
    }
}

impl PledgeStore for SqlitePledgeStore {
    fn ensure_ready(&self) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        self.open_into(&mut guard)?;
        drop(guard);
        Ok(())
    }

    fn insert_unique(&self, pledge: &NewPledge) -> Result<PledgeId, InsertError> {
        match self.insert_row(pledge)? {
            InsertOutcome::Inserted(id) => Ok(id),
            InsertOutcome::Duplicate => Err(InsertError::Duplicate),
        }
    }

    fn count(&self) -> Result<u64, StoreError> {
        let total = self.read(0_i64, |connection| {
            connection
                .query_row("SELECT COUNT(*) FROM pledges", params![], |row| row.get(0))
                .map_err(|err| SqliteStoreError::Db(err.to_string()))
        })?;
        u64::try_from(total)
            .map_err(|_| StoreError::Corrupt(format!("negative pledge count: {total}")))
    }

    fn list_newest_first(&self) -> Result<Vec<Pledge>, StoreError> {
        self.read(Vec::new(), |connection| {
            let mut statement = connection
                .prepare(
                    "SELECT id, company_name, contact_name, email, title, website, ip_address, \
                     created_at FROM pledges ORDER BY created_at DESC, id DESC",
                )
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            let rows = statement
                .query_map(params![], |row| {
                    Ok(Pledge {
                        id: PledgeId::new(row.get(0)?),
                        company_name: row.get(1)?,
                        contact_name: row.get(2)?,
                        email: row.get(3)?,
                        title: row.get(4)?,
                        website: row.get(5)?,
                        ip_address: row.get(6)?,
                        created_at: Timestamp::from_unix_seconds(row.get(7)?),
                    })
                })
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            rows.collect::<Result<Vec<_>, _>>().map_err(|err| SqliteStoreError::Db(err.to_string()))
        })
        .map_err(StoreError::from)
    }

    fn close(&self) -> Result<(), StoreError> {
        let connection = self.lock()?.take();
        if let Some(connection) = connection {
            connection
                .close()
                .map_err(|(_, err)| StoreError::Db(format!("close failed: {err}")))?;
        }
        Ok(())
    }
}

impl From<SqliteStoreError> for InsertError {
    fn from(error: SqliteStoreError) -> Self {
        Self::Store(error.into())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Opens an `SQLite` connection with secure defaults.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies `SQLite` pragmas required for durability.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS pledges (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    company_name TEXT NOT NULL,
                    contact_name TEXT NOT NULL,
                    email TEXT NOT NULL,
                    title TEXT NOT NULL DEFAULT '',
                    website TEXT NOT NULL DEFAULT '',
                    ip_address TEXT NOT NULL,
                    created_at INTEGER NOT NULL
                );
                CREATE UNIQUE INDEX IF NOT EXISTS idx_pledges_email ON pledges (email);
                CREATE UNIQUE INDEX IF NOT EXISTS idx_pledges_company_name
                    ON pledges (company_name);
                CREATE INDEX IF NOT EXISTS idx_pledges_created_at ON pledges (created_at);",
            )
            .map_err(|err| SqliteStoreError::Db(err.to_string()))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| SqliteStoreError::Db(err.to_string()))?;
    Ok(())
}
