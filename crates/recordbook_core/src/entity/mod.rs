//! Record ids and the entity store.

pub(crate) mod id;
mod store;

pub use id::{LooseId, RecordId, MAX_RECORD_ID};
pub use store::EntityStore;
