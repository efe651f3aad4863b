//! The record contract for entity stores.

use crate::entity::{LooseId, RecordId};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for types that can be kept in an entity store.
///
/// A record is an opaque payload with one reserved field, `id`. The store
/// reads the id to find records and writes it exactly once, in `add`. It
/// never inspects any other field.
///
/// Implementors must provide:
/// - `id()`: the stored id, or [`LooseId::Absent`] before one is assigned
/// - `assign_id()`: overwrite the id
///
/// Serialization goes through serde, so the record's JSON form is what
/// ends up in the persisted collection.
///
/// # Example
///
/// ```rust
/// use recordbook_core::{LooseId, Record, RecordId};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Note {
///     #[serde(default, skip_serializing_if = "Option::is_none")]
///     id: Option<RecordId>,
///     text: String,
/// }
///
/// impl Record for Note {
///     fn id(&self) -> LooseId {
///         self.id.into()
///     }
///
///     fn assign_id(&mut self, id: RecordId) {
///         self.id = Some(id);
///     }
/// }
/// ```
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Returns the record's id.
    fn id(&self) -> LooseId;

    /// Overwrites the record's id.
    fn assign_id(&mut self, id: RecordId);

    /// Returns a copy of this record carrying `id`.
    #[must_use]
    fn with_id(mut self, id: RecordId) -> Self {
        self.assign_id(id);
        self
    }
}
