//! Saved exclusion filters, keyed by user.
//!
//! - [`ExclusionStore`] - save/load/exists contract
//! - [`SqliteExclusionStore`] - `exclusions(user_id, exclusions)` table
//! - [`JsonFileExclusionStore`] - one JSON object on disk
//! - [`MemoryExclusionStore`] - nothing persisted
//!
//! Values are stored as the comma-joined token list and split again on
//! load, so a token can never contain a comma.

pub mod error;
pub mod json_file;
pub mod memory;
pub mod sqlite;
pub mod store;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use error::{StoreError, StoreResult};
pub use json_file::JsonFileExclusionStore;
pub use memory::MemoryExclusionStore;
pub use sqlite::SqliteExclusionStore;
pub use store::{ExclusionStore, decode_exclusions, encode_exclusions};

/// Which store implementation to open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Json,
    Memory,
}

impl StoreBackend {
    /// Default file name inside the data directory, if the backend uses one.
    pub fn default_file_name(self) -> Option<&'static str> {
        match self {
            Self::Sqlite => Some("filters.db"),
            Self::Json => Some("filters.json"),
            Self::Memory => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Json => "json",
            Self::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "json" => Ok(Self::Json),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown store backend '{other}' (expected sqlite, json or memory)"
            )),
        }
    }
}

/// Opens the store for `backend`. `path` is ignored for the memory backend.
pub fn open_store(backend: StoreBackend, path: &Path) -> StoreResult<Box<dyn ExclusionStore>> {
    Ok(match backend {
        StoreBackend::Sqlite => Box::new(SqliteExclusionStore::open(path)?),
        StoreBackend::Json => Box::new(JsonFileExclusionStore::new(path)),
        StoreBackend::Memory => Box::new(MemoryExclusionStore::new()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names() {
        assert_eq!("SQLite".parse::<StoreBackend>(), Ok(StoreBackend::Sqlite));
        assert_eq!("json".parse::<StoreBackend>(), Ok(StoreBackend::Json));
        assert!("redis".parse::<StoreBackend>().is_err());
        assert_eq!(StoreBackend::Memory.to_string(), "memory");
        assert_eq!(StoreBackend::default(), StoreBackend::Sqlite);
    }

    #[test]
    fn open_each_backend() {
        let dir = tempfile::tempdir().unwrap();
        for backend in [StoreBackend::Sqlite, StoreBackend::Json, StoreBackend::Memory] {
            let path = dir.path().join(backend.default_file_name().unwrap_or("unused"));
            let mut store = open_store(backend, &path).unwrap();
            assert_eq!(store.backend(), backend.as_str());
            store.save("u1", &["sync".to_string()]).unwrap();
            assert!(store.exists("u1").unwrap());
        }
    }
}
