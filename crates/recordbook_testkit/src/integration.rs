//! Model-checking harness for entity stores.
//!
//! [`StoreHarness`] applies each operation to a real [`EntityStore`] and to
//! a plain in-memory model of the collection, and asserts that both agree.

use crate::generators::StoreOperation;
use recordbook_core::{Collection, EntityStore, LooseId, Record, RecordId, StoreError};
use recordbook_storage::KeyValueStore;
use std::fmt::Debug;

/// Runs operations against a store and a reference model in lockstep.
pub struct StoreHarness<R, S> {
    /// The store under test.
    pub store: EntityStore<R, S>,
    next_id: RecordId,
    records: Vec<R>,
    issued: Vec<RecordId>,
}

impl<R, S> StoreHarness<R, S>
where
    R: Record + PartialEq + Debug,
    S: KeyValueStore,
{
    /// Wraps `store`, which must hold an empty or absent collection.
    pub fn new(store: EntityStore<R, S>) -> Self {
        let collection = store.load().expect("Failed to load collection");
        Self {
            store,
            next_id: collection.next_id,
            records: collection.records,
            issued: Vec::new(),
        }
    }

    /// Applies `op` to both the store and the model.
    pub fn apply(&mut self, op: StoreOperation<R>) {
        match op {
            StoreOperation::Add(record) => {
                let added = self.store.add(record.clone()).expect("Failed to add record");
                let expected = record.with_id(self.next_id);
                assert_eq!(added, expected, "add returned an unexpected record");
                assert!(
                    self.issued.last().map_or(true, |last| *last < self.next_id),
                    "ids must strictly increase"
                );
                self.issued.push(self.next_id);
                self.records.push(expected);
                self.next_id += 1;
            }
            StoreOperation::Update { id, record } => {
                let replacement = with_loose_id(record, &id);
                // Ids the record type cannot hold are dropped on decode.
                let id = replacement.id();
                let result = self.store.update(replacement.clone());
                match self.position(&id) {
                    Some(index) => {
                        let collection = result.expect("update of existing record failed");
                        let stored = self.records[index].id();
                        let stored = stored.as_record_id().expect("model ids are numeric");
                        self.records[index] = replacement.with_id(stored);
                        self.assert_matches(&collection);
                    }
                    _ => self.assert_rejected(result.map(|_| ()), &id),
                }
            }
            StoreOperation::Delete { id } => {
                let result = self.store.delete(id.clone());
                match self.position(&id) {
                    Some(index) => {
                        let collection = result.expect("delete of existing record failed");
                        self.records.remove(index);
                        self.assert_matches(&collection);
                    }
                    None => self.assert_rejected(result.map(|_| ()), &id),
                }
            }
            StoreOperation::Get { id } => {
                let result = self.store.get_by_id(id.clone());
                match self.position(&id) {
                    Some(index) => {
                        assert_eq!(result.expect("get failed"), self.records[index]);
                    }
                    None => self.assert_rejected(result.map(|_| ()), &id),
                }
            }
        }
    }

    /// Asserts that the persisted collection equals the model.
    pub fn verify(&self) {
        let collection = self.store.load().expect("Failed to load collection");
        self.assert_matches(&collection);
    }

    /// Ids issued by `add` so far, in order.
    pub fn issued_ids(&self) -> &[RecordId] {
        &self.issued
    }

    fn position(&self, id: &LooseId) -> Option<usize> {
        self.records.iter().position(|r| r.id().matches(id))
    }

    fn assert_matches(&self, collection: &Collection<R>) {
        assert_eq!(collection.next_id, self.next_id, "nextId diverged");
        assert_eq!(collection.records, self.records, "records diverged");
    }

    fn assert_rejected(&self, result: Result<(), StoreError>, id: &LooseId) {
        match result {
            Err(StoreError::MissingArgument) => assert!(id.is_absent()),
            Err(StoreError::NotFound { .. }) => assert!(!id.is_absent()),
            other => panic!("expected rejection for id {id:?}, got {other:?}"),
        }
        self.verify();
    }
}

/// Gives `record` the id argument `id` as it would arrive from a caller.
fn with_loose_id<R: Record>(record: R, id: &LooseId) -> R {
    let mut value = serde_json::to_value(&record).expect("Failed to encode record");
    if let Some(fields) = value.as_object_mut() {
        match id {
            LooseId::Absent => {
                fields.remove("id");
            }
            other => {
                fields.insert("id".to_string(), other.to_json());
            }
        }
    }
    serde_json::from_value(value).unwrap_or(record)
}
