//! The persisted collection for one entity kind.

use crate::collection::codec::Record;
use crate::entity::{LooseId, RecordId};
use serde::{Deserialize, Serialize};

/// Id counter plus records, persisted as one blob.
///
/// Serialized as `{"nextId": <int>, "records": [...]}`.
///
/// # Invariants
///
/// - `next_id` is at least 1 and never decreases
/// - every record id is unique and lies in `[1, next_id)`
/// - ids are never reused, even after the record holding one is deleted
/// - `records` keeps insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection<R> {
    /// Id the next `add` will assign.
    pub next_id: RecordId,
    /// Records in insertion order.
    pub records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: Vec::new(),
        }
    }
}

impl<R> Collection<R> {
    /// Creates an empty collection whose first id will be 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consumes the collection, returning its records.
    #[must_use]
    pub fn into_records(self) -> Vec<R> {
        self.records
    }
}

impl<R: Record> Collection<R> {
    /// Returns the index of the first record whose id loosely equals `id`.
    #[must_use]
    pub fn position(&self, id: &LooseId) -> Option<usize> {
        self.records.iter().position(|r| r.id().matches(id))
    }

    /// Returns the first record whose id loosely equals `id`.
    #[must_use]
    pub fn find(&self, id: &LooseId) -> Option<&R> {
        self.position(id).map(|i| &self.records[i])
    }

    /// Returns the largest numeric id among the records.
    #[must_use]
    pub fn max_id(&self) -> Option<RecordId> {
        self.records
            .iter()
            .filter_map(|r| r.id().as_record_id())
            .max()
    }
}
