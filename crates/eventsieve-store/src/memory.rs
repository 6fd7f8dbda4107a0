//! In-memory exclusion store for tests and `backend = "memory"` runs.

use std::collections::HashMap;

use crate::error::StoreResult;
use crate::store::{ExclusionStore, decode_exclusions, encode_exclusions};

/// Keeps the encoded values in a map so loads behave like the durable
/// backends.
#[derive(Debug, Clone, Default)]
pub struct MemoryExclusionStore {
    entries: HashMap<String, String>,
}

impl MemoryExclusionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a saved row, empty or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExclusionStore for MemoryExclusionStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    fn save(&mut self, user_id: &str, exclusions: &[String]) -> StoreResult<()> {
        self.entries
            .insert(user_id.to_string(), encode_exclusions(exclusions));
        Ok(())
    }

    fn load(&self, user_id: &str) -> StoreResult<Vec<String>> {
        Ok(self
            .entries
            .get(user_id)
            .map(|value| decode_exclusions(value))
            .unwrap_or_default())
    }
}
