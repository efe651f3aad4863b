//! Property-based test generators using proptest.
//!
//! Provides strategies for generating records, id arguments and
//! operation sequences against an entity store.

use recordbook_core::{JsonRecord, LooseId, Park, Todo};
use proptest::prelude::*;
use serde_json::Value;

const STATES: &[&str] = &["Arizona", "California", "Utah", "Wyoming", "Alaska", "Maine"];

/// Strategy for generating unsaved parks.
pub fn park_strategy() -> impl Strategy<Value = Park> {
    (
        "[A-Z][a-z]{2,12}( National Park)?",
        prop::sample::select(STATES),
        1u64..5_000_000,
        prop::option::of("[a-z ]{0,40}"),
    )
        .prop_map(|(name, state, acres, description)| {
            let park = Park::new(name, state, acres);
            match description {
                Some(d) => park.with_description(d),
                None => park,
            }
        })
}

/// Strategy for generating unsaved todos.
pub fn todo_strategy() -> impl Strategy<Value = Todo> {
    ("[a-z]{1,16}", "[a-z ]{0,32}", any::<bool>()).prop_map(|(title, details, done)| {
        let mut todo = Todo::new(title, details);
        todo.done = done;
        todo
    })
}

/// Strategy for generating schema-free records without an id.
pub fn json_record_strategy() -> impl Strategy<Value = JsonRecord> {
    let value = prop_oneof![
        any::<i32>().prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::from),
    ];
    prop::collection::btree_map("[a-z]{1,8}", value, 0..6).prop_map(|fields| {
        let mut record = JsonRecord::new();
        for (field, value) in fields {
            if field != "id" {
                record.insert(field, value);
            }
        }
        record
    })
}

/// Strategy for id arguments around `0..max`.
///
/// Mixes numeric ids, their textual forms (sometimes padded with
/// whitespace), non-numeric text and absent ids.
pub fn loose_id_strategy(max: u64) -> impl Strategy<Value = LooseId> {
    prop_oneof![
        4 => (0..max).prop_map(LooseId::from),
        2 => (0..max).prop_map(|n| LooseId::from(n.to_string())),
        1 => (0..max).prop_map(|n| LooseId::from(format!(" {n} "))),
        1 => "[a-z]{0,4}".prop_map(LooseId::from),
        1 => Just(LooseId::Absent),
    ]
}

/// An operation against an entity store.
#[derive(Debug, Clone)]
pub enum StoreOperation<R> {
    /// Add a record
    Add(R),
    /// Replace the record with `id`
    Update {
        /// Id carried by the replacement
        id: LooseId,
        /// Replacement fields
        record: R,
    },
    /// Delete a record
    Delete {
        /// Record id
        id: LooseId,
    },
    /// Get a record
    Get {
        /// Record id
        id: LooseId,
    },
}

/// Strategy for generating park operations with ids below `max_id`.
pub fn park_operation_strategy(max_id: u64) -> impl Strategy<Value = StoreOperation<Park>> {
    prop_oneof![
        3 => park_strategy().prop_map(StoreOperation::Add),
        1 => (loose_id_strategy(max_id), park_strategy())
            .prop_map(|(id, record)| StoreOperation::Update { id, record }),
        1 => loose_id_strategy(max_id).prop_map(|id| StoreOperation::Delete { id }),
        2 => loose_id_strategy(max_id).prop_map(|id| StoreOperation::Get { id }),
    ]
}

/// Strategy for generating a sequence of park operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOperation<Park>>> {
    prop::collection::vec(park_operation_strategy(max_ops as u64 + 2), min_ops..max_ops)
}
