//! SQLite-backed exclusion store.
//!
//! One row per user in `exclusions(user_id TEXT PRIMARY KEY, exclusions TEXT)`.
//! The schema is created when the connection is opened and its version is
//! tracked with `PRAGMA user_version`.

use std::path::Path;
use std::time::{Duration, Instant};

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use tracing::{debug, error, info};

use crate::error::{StoreError, StoreResult};
use crate::store::{ExclusionStore, decode_exclusions, encode_exclusions};

const BACKEND: &str = "sqlite";

/// Schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS exclusions (
    user_id TEXT PRIMARY KEY,
    exclusions TEXT
);";

const UPSERT: &str = "
INSERT INTO exclusions (user_id, exclusions) VALUES (?1, ?2)
ON CONFLICT(user_id) DO UPDATE SET exclusions = excluded.exclusions";

/// Exclusion store on a SQLite database file.
#[derive(Debug)]
pub struct SqliteExclusionStore {
    conn: Connection,
}

impl SqliteExclusionStore {
    /// Opens (creating if needed) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        debug!(path = %path.display(), "opening sqlite exclusion store");

        let conn = Connection::open(path).map_err(map_sqlite_error)?;
        Self::bootstrap(conn, "file", started_at)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        let started_at = Instant::now();
        let conn = Connection::open_in_memory().map_err(map_sqlite_error)?;
        Self::bootstrap(conn, "memory", started_at)
    }

    fn bootstrap(conn: Connection, mode: &'static str, started_at: Instant) -> StoreResult<Self> {
        match init_schema(&conn) {
            Ok(()) => {
                info!(
                    mode,
                    duration_ms = started_at.elapsed().as_millis() as u64,
                    "sqlite exclusion store ready"
                );
                Ok(Self { conn })
            }
            Err(err) => {
                error!(
                    mode,
                    duration_ms = started_at.elapsed().as_millis() as u64,
                    %err,
                    "sqlite exclusion store bootstrap failed"
                );
                Err(err)
            }
        }
    }
}

fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(map_sqlite_error)?;

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .map_err(map_sqlite_error)?;
    if version > SCHEMA_VERSION {
        return Err(StoreError::corrupt(
            BACKEND,
            format!("schema version {version} is newer than supported {SCHEMA_VERSION}"),
        ));
    }

    conn.execute_batch(SCHEMA).map_err(map_sqlite_error)?;
    if version < SCHEMA_VERSION {
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))
            .map_err(map_sqlite_error)?;
    }
    Ok(())
}

/// Sorts rusqlite failures into unreadable content and unreachable medium.
fn map_sqlite_error(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(ref code, _)
            if matches!(
                code.code,
                ErrorCode::NotADatabase | ErrorCode::DatabaseCorrupt
            ) =>
        {
            StoreError::corrupt(BACKEND, err.to_string())
        }
        rusqlite::Error::InvalidColumnType(..) | rusqlite::Error::FromSqlConversionFailure(..) => {
            StoreError::corrupt(BACKEND, err.to_string())
        }
        other => StoreError::unavailable(BACKEND, other),
    }
}

impl ExclusionStore for SqliteExclusionStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn save(&mut self, user_id: &str, exclusions: &[String]) -> StoreResult<()> {
        let value = encode_exclusions(exclusions);
        self.conn
            .execute(UPSERT, params![user_id, value])
            .map_err(map_sqlite_error)?;
        debug!(user_id, count = exclusions.len(), "saved exclusions");
        Ok(())
    }

    fn load(&self, user_id: &str) -> StoreResult<Vec<String>> {
        let stored: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT exclusions FROM exclusions WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
            .map_err(map_sqlite_error)?;

        let exclusions = stored
            .flatten()
            .map(|value| decode_exclusions(&value))
            .unwrap_or_default();
        debug!(user_id, count = exclusions.len(), "loaded exclusions");
        Ok(exclusions)
    }
}
