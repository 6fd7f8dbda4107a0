//! JSON file exclusion store.
//!
//! The whole store is one JSON object mapping user ids to their
//! comma-joined tokens, e.g. `{"u1": "sync,demo"}`. Every operation reads
//! the file fresh; saves rewrite it.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{ExclusionStore, decode_exclusions, encode_exclusions};

const BACKEND: &str = "json";

type Document = BTreeMap<String, String>;

/// Exclusion store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileExclusionStore {
    path: PathBuf,
}

impl JsonFileExclusionStore {
    /// Uses `path`; the file is created on the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> StoreResult<Document> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(err) => return Err(StoreError::unavailable(BACKEND, err)),
        };
        if content.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            StoreError::corrupt(BACKEND, format!("{}: {e}", self.path.display()))
        })
    }

    fn write_document(&self, document: &Document) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::unavailable(BACKEND, e))?;
        }
        let json =
            serde_json::to_string_pretty(document).map_err(|e| StoreError::unavailable(BACKEND, e))?;

        // Write to a sibling file, then rename over the store.
        let temp_path = self.temp_path();
        fs::write(&temp_path, json).map_err(|e| StoreError::unavailable(BACKEND, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| StoreError::unavailable(BACKEND, e))
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl ExclusionStore for JsonFileExclusionStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn save(&mut self, user_id: &str, exclusions: &[String]) -> StoreResult<()> {
        // A corrupt file is reported rather than overwritten.
        let mut document = self.read_document()?;
        document.insert(user_id.to_string(), encode_exclusions(exclusions));
        self.write_document(&document)?;
        debug!(path = %self.path.display(), user_id, count = exclusions.len(), "saved exclusions");
        Ok(())
    }

    fn load(&self, user_id: &str) -> StoreResult<Vec<String>> {
        let document = self.read_document()?;
        Ok(document
            .get(user_id)
            .map(|value| decode_exclusions(value))
            .unwrap_or_default())
    }
}
