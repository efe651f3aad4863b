//! One backend, one store per entity kind.

use crate::collection::JsonRecord;
use crate::config::Config;
use crate::entity::EntityStore;
use crate::kinds::{EntityKind, Park, Restaurant, School, Todo, TypedEntity, UcsbDate};
use recordbook_storage::KeyValueStore;
use std::sync::Arc;

/// Hands out entity stores that share a single backend.
///
/// ```rust
/// use recordbook_core::{EntityKind, Park, Record, Stores};
/// use recordbook_storage::InMemoryKeyValueStore;
///
/// let stores = Stores::new(InMemoryKeyValueStore::new());
/// let zion = stores.parks().add(Park::new("Zion", "Utah", 147242)).unwrap();
///
/// // The same collection, seen without compile-time types.
/// let dynamic = stores.dynamic(EntityKind::Park).get_by_id("1").unwrap();
/// assert_eq!(dynamic.get("name").and_then(|v| v.as_str()), Some("Zion"));
/// assert!(zion.id().matches(&dynamic.id()));
/// ```
#[derive(Debug)]
pub struct Stores<S: ?Sized> {
    backend: Arc<S>,
    config: Config,
}

impl<S: ?Sized> Clone for Stores<S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            config: self.config.clone(),
        }
    }
}

impl<S: KeyValueStore> Stores<S> {
    /// Wraps a backend with the default configuration.
    pub fn new(backend: S) -> Self {
        Self::from_arc(Arc::new(backend), Config::default())
    }

    /// Wraps a backend with an explicit configuration.
    pub fn with_config(backend: S, config: Config) -> Self {
        Self::from_arc(Arc::new(backend), config)
    }
}

impl<S: KeyValueStore + ?Sized> Stores<S> {
    /// Wraps an already shared backend.
    pub fn from_arc(backend: Arc<S>, config: Config) -> Self {
        Self { backend, config }
    }

    /// Returns the shared backend.
    pub fn backend(&self) -> &Arc<S> {
        &self.backend
    }

    /// Returns the store configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a typed store for `R` under its default key.
    pub fn typed<R: TypedEntity>(&self) -> EntityStore<R, Arc<S>> {
        EntityStore::for_kind(Arc::clone(&self.backend), R::KIND, self.config.clone())
    }

    /// Returns a schema-free store for `kind`.
    pub fn dynamic(&self, kind: EntityKind) -> EntityStore<JsonRecord, Arc<S>> {
        EntityStore::for_kind(Arc::clone(&self.backend), kind, self.config.clone())
    }

    /// Park store.
    pub fn parks(&self) -> EntityStore<Park, Arc<S>> {
        self.typed()
    }

    /// School store.
    pub fn schools(&self) -> EntityStore<School, Arc<S>> {
        self.typed()
    }

    /// Restaurant store.
    pub fn restaurants(&self) -> EntityStore<Restaurant, Arc<S>> {
        self.typed()
    }

    /// Date store.
    pub fn ucsb_dates(&self) -> EntityStore<UcsbDate, Arc<S>> {
        self.typed()
    }

    /// Todo store.
    pub fn todos(&self) -> EntityStore<Todo, Arc<S>> {
        self.typed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Record;
    use crate::entity::LooseId;
    use recordbook_storage::InMemoryKeyValueStore;

    #[test]
    fn kinds_use_separate_keys() {
        let stores = Stores::new(InMemoryKeyValueStore::new());
        stores.parks().add(Park::new("Zion", "Utah", 147242)).unwrap();
        stores
            .schools()
            .add(School::new("Isla Vista Elementary School", "Goleta Union School District", "K-6"))
            .unwrap();

        let keys: Vec<String> = stores.backend().entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["parks".to_string(), "schools".to_string()]);
        assert_eq!(stores.schools().load().unwrap().next_id, 2);
        assert!(stores.restaurants().all().unwrap().is_empty());
    }

    #[test]
    fn typed_and_dynamic_views_agree() {
        let stores = Stores::new(InMemoryKeyValueStore::new());
        let todo = stores.todos().add(Todo::new("write tests", "store layer")).unwrap();

        let json = stores.dynamic(EntityKind::Todo).get_by_id(1u64).unwrap();
        assert_eq!(json.get("title").and_then(|v| v.as_str()), Some("write tests"));
        assert_eq!(todo.id(), LooseId::Integer(1));
    }

    #[test]
    fn dynamic_writes_are_visible_to_typed_store() {
        let stores = Stores::new(InMemoryKeyValueStore::new());
        let record = JsonRecord::from_value(serde_json::json!({
            "quarterYYYYQ": "20221",
            "name": "First day of classes",
            "localDateTime": "2022-01-03T00:00:00"
        }))
        .unwrap();
        stores.dynamic(EntityKind::UcsbDate).add(record).unwrap();

        let dates = stores.ucsb_dates().all().unwrap();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].id, Some(1));
        assert_eq!(dates[0].name, "First day of classes");
    }

    #[test]
    fn clone_shares_backend() {
        let stores = Stores::with_config(InMemoryKeyValueStore::new(), Config::new().pretty_print(true));
        let copy = stores.clone();
        copy.parks().load().unwrap();
        assert_eq!(stores.backend().write_count(), 1);
        assert!(stores.config().pretty_print);
    }

    #[test]
    fn file_backend_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let open = || Stores::new(recordbook_storage::FileKeyValueStore::open(dir.path()).unwrap());

        let zion = open().parks().add(Park::new("Zion", "Utah", 147242)).unwrap();
        let reopened = open();

        assert_eq!(reopened.parks().get_by_id("1").unwrap(), zion);
        assert_eq!(reopened.parks().load().unwrap().next_id, 2);
    }

    #[test]
    fn typed_read_never_wipes_dynamic_records() {
        let stores = Stores::new(InMemoryKeyValueStore::new());
        let dynamic = stores.dynamic(EntityKind::Park);
        dynamic
            .add(JsonRecord::from_value(serde_json::json!({"name": "Arches"})).unwrap())
            .unwrap();
        dynamic
            .add(
                JsonRecord::from_value(
                    serde_json::json!({"name": "Zion", "state": "Utah", "acres": 147242}),
                )
                .unwrap(),
            )
            .unwrap();

        assert!(stores.parks().load().unwrap_err().is_decode());
        assert!(stores.parks().add(Park::new("Denali", "Alaska", 4740911)).is_err());

        let after = dynamic.load().unwrap();
        assert_eq!(after.next_id, 3);
        assert_eq!(after.len(), 2);
        assert_eq!(dynamic.add(JsonRecord::new()).unwrap().id(), LooseId::Integer(3));
    }
}
