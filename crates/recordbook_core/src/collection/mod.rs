//! Collections and the record contract.
//!
//! A [`Collection<R>`] is the persisted unit for one entity kind: an id
//! counter plus the records in insertion order. Records implement
//! [`Record`]; [`JsonRecord`] is the schema-free implementation.

mod codec;
mod json_record;
mod typed;

pub use codec::Record;
pub use json_record::{JsonRecord, NotAnObject};
pub use typed::Collection;
