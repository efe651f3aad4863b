//! Error types for recordbook core.

use crate::entity::LooseId;
use recordbook_storage::StorageError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by an entity store.
///
/// Every condition is a value; nothing in the store panics. A blob that
/// is not a `{nextId, records}` object is not an error here: the store
/// recovers by reinitializing the collection. A well-formed blob whose
/// records do not fit the record type is [`StoreError::Decode`] and is
/// never overwritten.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A required id argument was omitted.
    #[error("id is a required parameter")]
    MissingArgument,

    /// No record matches the requested id.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity name, e.g. `park`.
        entity: String,
        /// The id as the caller supplied it.
        id: String,
    },

    /// The key-value backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// A collection could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),

    /// A stored record does not match the record type.
    #[error("record {index} under {key} cannot be read: {reason}")]
    Decode {
        /// Collection key.
        key: String,
        /// Position of the record in the collection.
        index: usize,
        /// Decoder message.
        reason: String,
    },

    /// The collection has no ids left to assign.
    #[error("{key} has run out of record ids")]
    IdsExhausted {
        /// Collection key.
        key: String,
    },
}

impl StoreError {
    /// Creates a not-found error for `entity` and the id the caller asked for.
    pub fn not_found(entity: impl Into<String>, id: &LooseId) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Returns `true` for [`StoreError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`StoreError::Decode`].
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Returns `true` for [`StoreError::MissingArgument`].
    #[must_use]
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, Self::MissingArgument)
    }

    /// Renders the error as the `{"error": "..."}` body that list and
    /// detail views display.
    #[must_use]
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

/// Serializable error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            StoreError::MissingArgument.to_string(),
            "id is a required parameter"
        );
        assert_eq!(
            StoreError::not_found("park", &LooseId::from(99u64)).to_string(),
            "park with id 99 not found"
        );
    }

    #[test]
    fn body_shape() {
        let body = StoreError::not_found("school", &LooseId::from("7")).to_body();
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"error":"school with id 7 not found"}"#
        );
    }

    #[test]
    fn predicates() {
        assert!(StoreError::MissingArgument.is_missing_argument());
        assert!(!StoreError::MissingArgument.is_not_found());
        assert!(StoreError::not_found("todo", &LooseId::Absent).is_not_found());
    }
}
