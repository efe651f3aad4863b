//! In-memory key-value store for testing.

use crate::backend::KeyValueStore;
use crate::error::StorageResult;
use crate::key::validate_key;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// An in-memory key-value store.
///
/// This backend keeps every blob in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Sessions that don't need persistence
///
/// It also counts writes, so tests can assert how often an entity store
/// persisted.
///
/// # Thread Safety
///
/// This backend is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use recordbook_storage::{InMemoryKeyValueStore, KeyValueStore};
///
/// let store = InMemoryKeyValueStore::new();
/// assert_eq!(store.get("parks").unwrap(), None);
/// store.set("parks", "null").unwrap();
/// assert_eq!(store.write_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: BTreeMap<String, String>,
    writes: u64,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with pre-existing entries.
    ///
    /// Preloaded entries do not count as writes. Useful for testing
    /// recovery from corrupt or legacy blobs.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            inner: RwLock::new(Inner { entries, writes: 0 }),
        }
    }

    /// Returns a copy of all entries, ordered by key.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        self.inner
            .read()
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns the number of successful `set` calls.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.inner.read().writes
    }

    /// Removes the blob stored under `key`, returning it.
    pub fn remove(&self, key: &str) -> Option<String> {
        self.inner.write().entries.remove(key)
    }

    /// Clears all entries. The write counter is kept.
    pub fn clear(&self) {
        self.inner.write().entries.clear();
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        validate_key(key)?;
        Ok(self.inner.read().entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        validate_key(key)?;
        let mut inner = self.inner.write();
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use std::sync::Arc;

    #[test]
    fn memory_new_is_empty() {
        let store = InMemoryKeyValueStore::new();
        assert!(store.entries().is_empty());
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.get("parks").unwrap(), None);
    }

    #[test]
    fn memory_set_then_get() {
        let store = InMemoryKeyValueStore::new();
        store.set("parks", "{}").unwrap();
        assert_eq!(store.get("parks").unwrap().as_deref(), Some("{}"));
        assert!(store.contains("parks").unwrap());
        assert!(!store.contains("schools").unwrap());
    }

    #[test]
    fn memory_set_replaces_whole_value() {
        let store = InMemoryKeyValueStore::new();
        store.set("parks", "first value").unwrap();
        store.set("parks", "2nd").unwrap();
        assert_eq!(store.get("parks").unwrap().as_deref(), Some("2nd"));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn memory_keys_are_independent() {
        let store = InMemoryKeyValueStore::new();
        store.set("parks", "p").unwrap();
        store.set("schools", "s").unwrap();
        assert_eq!(
            store.entries(),
            vec![
                ("parks".to_string(), "p".to_string()),
                ("schools".to_string(), "s".to_string())
            ]
        );
    }

    #[test]
    fn memory_with_entries_does_not_count_writes() {
        let store = InMemoryKeyValueStore::with_entries([("parks", "null")]);
        assert_eq!(store.get("parks").unwrap().as_deref(), Some("null"));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn memory_remove_and_clear() {
        let store = InMemoryKeyValueStore::with_entries([("a", "1"), ("b", "2")]);
        assert_eq!(store.remove("a").as_deref(), Some("1"));
        assert_eq!(store.get("a").unwrap(), None);
        store.clear();
        assert!(store.entries().is_empty());
    }

    #[test]
    fn memory_rejects_invalid_key() {
        let store = InMemoryKeyValueStore::new();
        assert!(matches!(
            store.set("../etc", "x"),
            Err(StorageError::InvalidKey { .. })
        ));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn memory_shared_through_arc() {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let shared: Arc<dyn KeyValueStore> = store.clone();
        shared.set("todos", "[]").unwrap();
        assert_eq!(store.get("todos").unwrap().as_deref(), Some("[]"));
    }
}
