//! Entity store for CRUD operations.

use crate::collection::{Collection, Record};
use crate::config::Config;
use crate::entity::{LooseId, MAX_RECORD_ID};
use crate::error::{StoreError, StoreResult};
use crate::kinds::{EntityKind, TypedEntity};
use recordbook_storage::{KeyValueStore, StorageError};
use serde_json::Value;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Durable CRUD access to one named collection.
///
/// An `EntityStore` fronts the blob stored under `key` in a
/// [`KeyValueStore`]. Every call is a complete read-modify-write: load the
/// collection, apply the change, write the whole collection back. Nothing
/// is cached between calls, so the backend is always the source of truth.
///
/// Errors are returned as values. A failed `update` or `delete` does not
/// write, leaving the stored blob exactly as it was.
///
/// # Example
///
/// ```rust
/// use recordbook_core::{EntityStore, JsonRecord};
/// use recordbook_storage::InMemoryKeyValueStore;
/// use serde_json::json;
///
/// let parks: EntityStore<JsonRecord, _> =
///     EntityStore::new(InMemoryKeyValueStore::new(), "parks", "park");
///
/// let yosemite = parks
///     .add(JsonRecord::from_value(json!({"name": "Yosemite"})).unwrap())
///     .unwrap();
/// assert_eq!(yosemite.get("id"), Some(&json!(1)));
///
/// let found = parks.get_by_id("1").unwrap();
/// assert_eq!(found, yosemite);
///
/// let err = parks.delete(99u64).unwrap_err();
/// assert_eq!(err.to_string(), "park with id 99 not found");
/// ```
pub struct EntityStore<R, S> {
    backend: S,
    key: String,
    entity: String,
    config: Config,
    _marker: PhantomData<fn() -> R>,
}

impl<R: Record, S: KeyValueStore> EntityStore<R, S> {
    /// Creates a store for the collection under `key`.
    ///
    /// `entity` is the singular name used in error messages, e.g. `park`.
    pub fn new(backend: S, key: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::with_config(backend, key, entity, Config::default())
    }

    /// Creates a store with an explicit configuration.
    pub fn with_config(
        backend: S,
        key: impl Into<String>,
        entity: impl Into<String>,
        config: Config,
    ) -> Self {
        Self {
            backend,
            key: key.into(),
            entity: entity.into(),
            config,
            _marker: PhantomData,
        }
    }

    /// Creates a store for one of the built-in entity kinds.
    pub fn for_kind(backend: S, kind: EntityKind, config: Config) -> Self {
        Self::with_config(backend, kind.collection_key(), kind.entity_name(), config)
    }

    /// Returns the collection key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the entity name used in error messages.
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Returns the backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Loads the collection, initializing it if needed.
    ///
    /// When no blob exists, or the blob is not a `{nextId, records}`
    /// object (including `null` and text that is not UTF-8), a fresh
    /// `{nextId: 1, records: []}` is written and returned. Otherwise the
    /// parsed collection is returned without writing. A `nextId` at or
    /// below the largest stored id is advanced past it.
    ///
    /// # Errors
    ///
    /// [`StoreError::Decode`] if a record in a well-formed blob does not
    /// fit `R`. The blob is left as it is.
    pub fn load(&self) -> StoreResult<Collection<R>> {
        match self.backend.get(&self.key) {
            Ok(Some(blob)) => match parse_envelope(&blob) {
                Ok(Some(envelope)) => return self.decode(envelope),
                Ok(None) => {
                    debug!(key = %self.key, "stored collection is null");
                }
                Err(reason) => {
                    warn!(key = %self.key, %reason, "stored collection is unreadable, reinitializing");
                }
            },
            Ok(None) => {}
            Err(StorageError::NotUtf8 { .. }) => {
                warn!(key = %self.key, "stored collection is not UTF-8, reinitializing");
            }
            Err(e) => return Err(e.into()),
        }

        let collection = Collection::new();
        self.persist(&collection)?;
        info!(key = %self.key, "initialized empty collection");
        Ok(collection)
    }

    /// Returns every record in insertion order.
    pub fn all(&self) -> StoreResult<Vec<R>> {
        Ok(self.load()?.into_records())
    }

    /// Returns the record whose id loosely equals `id`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingArgument`] if `id` is absent
    /// - [`StoreError::NotFound`] if no record matches
    pub fn get_by_id(&self, id: impl Into<LooseId>) -> StoreResult<R> {
        let id = id.into();
        if id.is_absent() {
            return Err(StoreError::MissingArgument);
        }

        let collection = self.load()?;
        collection
            .find(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(&self.entity, &id))
    }

    /// Adds a record, assigning it the next id.
    ///
    /// Any id already on `record` is overwritten. Returns the stored record.
    ///
    /// # Errors
    ///
    /// [`StoreError::IdsExhausted`] once `next_id` passes
    /// [`MAX_RECORD_ID`](crate::MAX_RECORD_ID); nothing is written.
    pub fn add(&self, record: R) -> StoreResult<R> {
        let mut collection = self.load()?;

        let id = collection.next_id;
        if id > MAX_RECORD_ID {
            return Err(StoreError::IdsExhausted {
                key: self.key.clone(),
            });
        }
        let record = record.with_id(id);
        collection.records.push(record.clone());
        collection.next_id = id + 1;

        self.persist(&collection)?;
        debug!(key = %self.key, id, "added record");
        Ok(record)
    }

    /// Replaces the record with the same id, keeping its position.
    ///
    /// The replacement is a full replacement, not a merge. The stored id
    /// is kept as-is, so a replacement carrying `"2"` for a record stored
    /// with `2` still leaves a numeric id in the collection. Returns the
    /// updated collection.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingArgument`] if `record` has no id
    /// - [`StoreError::NotFound`] if no record matches
    pub fn update(&self, record: R) -> StoreResult<Collection<R>> {
        let id = record.id();
        if id.is_absent() {
            return Err(StoreError::MissingArgument);
        }

        let mut collection = self.load()?;
        let index = collection
            .position(&id)
            .ok_or_else(|| StoreError::not_found(&self.entity, &id))?;

        let replacement = match collection.records[index].id().as_record_id() {
            Some(stored) => record.with_id(stored),
            None => record,
        };
        collection.records[index] = replacement;

        self.persist(&collection)?;
        debug!(key = %self.key, %id, index, "updated record");
        Ok(collection)
    }

    /// Removes the record whose id loosely equals `id`.
    ///
    /// Other records keep their relative order and `next_id` is unchanged.
    /// Returns the updated collection.
    ///
    /// # Errors
    ///
    /// - [`StoreError::MissingArgument`] if `id` is absent
    /// - [`StoreError::NotFound`] if no record matches
    pub fn delete(&self, id: impl Into<LooseId>) -> StoreResult<Collection<R>> {
        let id = id.into();
        if id.is_absent() {
            return Err(StoreError::MissingArgument);
        }

        let mut collection = self.load()?;
        let index = collection
            .position(&id)
            .ok_or_else(|| StoreError::not_found(&self.entity, &id))?;
        collection.records.remove(index);

        self.persist(&collection)?;
        debug!(key = %self.key, %id, "deleted record");
        Ok(collection)
    }

    /// Serializes a collection the way this store persists it.
    pub fn encode(&self, collection: &Collection<R>) -> StoreResult<String> {
        let blob = if self.config.pretty_print {
            serde_json::to_string_pretty(collection)?
        } else {
            serde_json::to_string(collection)?
        };
        Ok(blob)
    }

    fn decode(&self, envelope: Collection<Value>) -> StoreResult<Collection<R>> {
        let records = envelope
            .records
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                serde_json::from_value(value).map_err(|e| StoreError::Decode {
                    key: self.key.clone(),
                    index,
                    reason: e.to_string(),
                })
            })
            .collect::<StoreResult<Vec<R>>>()?;

        let mut collection = Collection {
            next_id: envelope.next_id,
            records,
        };
        if let Some(max_id) = collection.max_id() {
            if collection.next_id <= max_id {
                warn!(key = %self.key, next_id = collection.next_id, max_id, "nextId is behind stored ids, advancing it");
                collection.next_id = max_id.saturating_add(1);
            }
        }

        debug!(
            key = %self.key,
            records = collection.len(),
            next_id = collection.next_id,
            "loaded collection"
        );
        Ok(collection)
    }

    fn persist(&self, collection: &Collection<R>) -> StoreResult<()> {
        let blob = self.encode(collection)?;
        self.backend.set(&self.key, &blob)?;
        Ok(())
    }
}

impl<R: TypedEntity, S: KeyValueStore> EntityStore<R, S> {
    /// Creates a store for a typed entity under its default key.
    pub fn typed(backend: S) -> Self {
        Self::for_kind(backend, R::KIND, Config::default())
    }
}

impl<R, S> std::fmt::Debug for EntityStore<R, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("key", &self.key)
            .field("entity", &self.entity)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Parses the `{nextId, records}` shape of a stored blob, leaving records
/// undecoded. `Ok(None)` means the blob was `null`.
fn parse_envelope(blob: &str) -> Result<Option<Collection<Value>>, String> {
    let parsed: Option<Collection<Value>> =
        serde_json::from_str(blob).map_err(|e| e.to_string())?;
    match parsed {
        Some(collection) if collection.next_id == 0 => Err("nextId must be positive".into()),
        other => Ok(other),
    }
}
