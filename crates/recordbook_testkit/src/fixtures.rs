//! Record fixtures and store helpers.
//!
//! The fixture records carry the ids they would have after being added to
//! a fresh store (`one_*` starts at 1, `three_*` at 2), so they can be
//! seeded straight into a backend.

use recordbook_core::{Collection, Config, Park, Record, Restaurant, School, Stores, TypedEntity};
use recordbook_storage::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
use std::sync::Arc;
use tempfile::TempDir;

/// One park with id 1.
pub fn one_park() -> Vec<Park> {
    vec![Park::new("Yosemite National Park", "California", 761747)
        .with_description("Iconic granite cliffs, waterfalls, giant sequoias, and diverse wildlife.")
        .with_id(1)]
}

/// Three parks with ids 2, 3 and 4.
pub fn three_parks() -> Vec<Park> {
    vec![
        Park::new("Grand Canyon National Park", "Arizona", 1218375)
            .with_description(
                "Spectacular landscape of deep canyons and colorful rock formations, \
                 carved over millions of years by the Colorado River.",
            )
            .with_id(2),
        Park::new("Zion National Park", "Utah", 147242)
            .with_description(
                "Magnificent sandstone cliffs, narrow canyons, and diverse plant and animal life.",
            )
            .with_id(3),
        Park::new("Grand Teton National Park", "Wyoming", 310044)
            .with_description("Towering mountain peaks, glacial lakes, and abundant wildlife.")
            .with_id(4),
    ]
}

/// One school with id 1.
pub fn one_school() -> Vec<School> {
    vec![School::new(
        "Goleta Valley Junior High School",
        "Santa Barbara Unified School District",
        "7-8",
    )
    .with_id(1)]
}

/// Three schools with ids 2, 3 and 4.
pub fn three_schools() -> Vec<School> {
    vec![
        School::new("Isla Vista Elementary School", "Goleta Union School District", "K-6")
            .with_id(2),
        School::new(
            "Dos Pueblos High School",
            "Santa Barbara Unified School District",
            "9-12",
        )
        .with_id(3),
        School::new(
            "Carpinteria High School",
            "Carpinteria Unified School District",
            "9-12",
        )
        .with_id(4),
    ]
}

/// One restaurant with id 1.
pub fn one_restaurant() -> Vec<Restaurant> {
    vec![Restaurant::new("The Habit", "american", 5).with_id(1)]
}

/// Three restaurants with ids 2, 3 and 4.
pub fn three_restaurants() -> Vec<Restaurant> {
    vec![
        Restaurant::new("Cristino's Bakery", "pastries", 2).with_id(2),
        Restaurant::new("Freebirds", "mexican", 1).with_id(3),
        Restaurant::new("Ca' Dario Cucina Italiana", "italian", 3).with_id(4),
    ]
}

/// A blob in the persisted `{nextId, records}` form with a raw JSON
/// records array, for seeding legacy or hand-written data.
pub fn raw_blob(next_id: u64, records: serde_json::Value) -> String {
    serde_json::json!({ "nextId": next_id, "records": records }).to_string()
}

/// Stores over a throwaway backend.
pub struct TestStores {
    /// The stores instance.
    pub stores: Stores<dyn KeyValueStore>,
    memory: Option<Arc<InMemoryKeyValueStore>>,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestStores {
    /// Creates stores over a fresh in-memory backend.
    pub fn memory() -> Self {
        Self::memory_with_config(Config::default())
    }

    /// Creates stores over a fresh in-memory backend with `config`.
    pub fn memory_with_config(config: Config) -> Self {
        let memory = Arc::new(InMemoryKeyValueStore::new());
        let backend: Arc<dyn KeyValueStore> = memory.clone();
        Self {
            stores: Stores::from_arc(backend, config),
            memory: Some(memory),
            _temp_dir: None,
        }
    }

    /// Creates stores over a file backend in a temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let backend: Arc<dyn KeyValueStore> = Arc::new(
            FileKeyValueStore::open(temp_dir.path()).expect("Failed to open file store"),
        );
        Self {
            stores: Stores::from_arc(backend, Config::default()),
            memory: None,
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns the data directory if file-based, None if in-memory.
    pub fn path(&self) -> Option<&std::path::Path> {
        self._temp_dir.as_ref().map(TempDir::path)
    }

    /// Number of blob writes so far, if in-memory.
    pub fn write_count(&self) -> Option<u64> {
        self.memory.as_ref().map(|m| m.write_count())
    }

    /// Returns the raw blob stored under `key`.
    pub fn blob(&self, key: &str) -> Option<String> {
        self.stores.backend().get(key).expect("Failed to read blob")
    }

    /// Writes a raw blob under `key`.
    pub fn put_blob(&self, key: &str, blob: &str) {
        self.stores
            .backend()
            .set(key, blob)
            .expect("Failed to write blob");
    }

    /// Persists `records` as the collection of their kind, with `nextId`
    /// one past the largest id.
    pub fn seed<R: TypedEntity>(&self, records: Vec<R>) {
        let mut collection = Collection {
            next_id: 1,
            records,
        };
        collection.next_id = collection.max_id().map_or(1, |max| max + 1);
        let blob = serde_json::to_string(&collection).expect("Failed to encode fixtures");
        self.put_blob(R::KIND.collection_key(), &blob);
    }
}

impl std::ops::Deref for TestStores {
    type Target = Stores<dyn KeyValueStore>;

    fn deref(&self) -> &Self::Target {
        &self.stores
    }
}

/// Runs a test with stores over a temporary in-memory backend.
///
/// # Example
///
/// ```rust
/// use recordbook_testkit::with_temp_stores;
///
/// with_temp_stores(|stores| {
///     assert!(stores.todos().all().unwrap().is_empty());
/// });
/// ```
pub fn with_temp_stores<F, T>(f: F) -> T
where
    F: FnOnce(&TestStores) -> T,
{
    let stores = TestStores::memory();
    f(&stores)
}

/// Runs a test with stores over a temporary file backend.
pub fn with_file_stores<F, T>(f: F) -> T
where
    F: FnOnce(&TestStores, &std::path::Path) -> T,
{
    let stores = TestStores::file();
    let path = stores.path().expect("File stores should have a path").to_path_buf();
    f(&stores, &path)
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// In-memory stores seeded with [`three_parks`], [`three_schools`]
    /// and [`three_restaurants`].
    pub fn populated_stores() -> TestStores {
        let stores = TestStores::memory();
        stores.seed(three_parks());
        stores.seed(three_schools());
        stores.seed(three_restaurants());
        stores
    }
}
