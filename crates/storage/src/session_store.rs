use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::repository::StorageError;

/// Session key holding the most recent result record.
pub const TEST_RESULTS_KEY: &str = "testResults";

/// Session key holding the logged-in identity.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Key/value storage that lives only as long as the application session.
///
/// Values are opaque strings; the last write to a key wins.
pub trait SessionStore: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is unavailable.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is unavailable.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store is unavailable.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let store = InMemorySessionStore::new();
        store.set(TEST_RESULTS_KEY, "first".into()).unwrap();
        store.set(TEST_RESULTS_KEY, "second".into()).unwrap();
        assert_eq!(store.get(TEST_RESULTS_KEY).unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let store = InMemorySessionStore::new();
        store.remove(CURRENT_USER_KEY).unwrap();
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap(), None);
    }

    #[test]
    fn clones_share_entries() {
        let store = InMemorySessionStore::new();
        let other = store.clone();
        other.set("k", "v".into()).unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
