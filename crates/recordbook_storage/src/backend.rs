//! Key-value store trait definition.

use crate::error::StorageResult;
use std::sync::Arc;

/// The persistence boundary of an entity store.
///
/// A key-value store holds one serialized blob per key. Writes replace the
/// whole value; there are no partial updates.
///
/// # Invariants
///
/// - `get` returns exactly the last value passed to `set` for that key
/// - `get` returns `None` for a key that was never set
/// - Implementations must be `Send + Sync` so one backend can be shared
///   by every entity store in a process
pub trait KeyValueStore: Send + Sync {
    /// Reads the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the backend cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the write fails.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Returns `true` if a blob exists for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        (**self).contains(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn contains(&self, key: &str) -> StorageResult<bool> {
        (**self).contains(key)
    }
}
