//! The ExclusionStore trait and the on-disk value encoding.

use crate::error::StoreResult;

/// Durable mapping from a user id to that user's saved exclusion tokens.
///
/// Writes are last-write-wins. Saving the same list twice leaves the store
/// unchanged.
pub trait ExclusionStore {
    /// Short backend name used in logs and errors.
    fn backend(&self) -> &'static str;

    /// Replaces the saved list for `user_id`.
    fn save(&mut self, user_id: &str, exclusions: &[String]) -> StoreResult<()>;

    /// Returns the saved list for `user_id`, or an empty list if none exists.
    fn load(&self, user_id: &str) -> StoreResult<Vec<String>>;

    /// Returns true if `user_id` has a non-empty saved list.
    fn exists(&self, user_id: &str) -> StoreResult<bool> {
        Ok(!self.load(user_id)?.is_empty())
    }
}

impl<S: ExclusionStore + ?Sized> ExclusionStore for Box<S> {
    fn backend(&self) -> &'static str {
        (**self).backend()
    }

    fn save(&mut self, user_id: &str, exclusions: &[String]) -> StoreResult<()> {
        (**self).save(user_id, exclusions)
    }

    fn load(&self, user_id: &str) -> StoreResult<Vec<String>> {
        (**self).load(user_id)
    }

    fn exists(&self, user_id: &str) -> StoreResult<bool> {
        (**self).exists(user_id)
    }
}

/// Joins tokens with `,` for storage.
pub fn encode_exclusions(exclusions: &[String]) -> String {
    exclusions.join(",")
}

/// Splits a stored value on `,`, trimming and dropping empty pieces.
pub fn decode_exclusions(stored: &str) -> Vec<String> {
    stored
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
