//! The built-in entity kinds.
//!
//! Five kinds share the same store: parks, schools, restaurants, dates and
//! todos. [`EntityKind`] names them at runtime; the structs in this module
//! are their typed record shapes.

mod kind;
mod records;

pub use kind::{EntityKind, UnknownEntityKind};
pub use records::{Park, Restaurant, School, Todo, TypedEntity, UcsbDate};
