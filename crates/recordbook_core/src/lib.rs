//! # recordbook core
//!
//! A generic CRUD store over a key-value backend.
//!
//! This crate provides:
//! - [`EntityStore`], durable CRUD access to one collection of records
//! - [`Collection`], the persisted id counter plus records
//! - [`LooseId`], id arguments compared with numeric/text coercion
//! - The built-in entity kinds ([`Park`], [`School`], [`Restaurant`],
//!   [`UcsbDate`], [`Todo`]) and the schema-free [`JsonRecord`]
//! - [`Stores`], one shared backend handing out a store per kind
//! - Role predicates ([`access`]) and remote request shapes ([`endpoint`])
//!
//! ## Example
//!
//! ```rust
//! use recordbook_core::{Park, Stores};
//! use recordbook_storage::InMemoryKeyValueStore;
//!
//! let stores = Stores::new(InMemoryKeyValueStore::new());
//! let parks = stores.parks();
//!
//! let yosemite = parks.add(Park::new("Yosemite", "California", 761747)).unwrap();
//! assert_eq!(yosemite.id, Some(1));
//!
//! let collection = parks.load().unwrap();
//! assert_eq!(collection.next_id, 2);
//! assert_eq!(collection.records, vec![yosemite]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod access;
mod collection;
mod config;
pub mod endpoint;
mod entity;
mod error;
mod kinds;
mod stores;

pub use access::{has_role, Access, CurrentUser, ROLE_ADMIN, ROLE_USER};
pub use collection::{Collection, JsonRecord, NotAnObject, Record};
pub use config::Config;
pub use endpoint::{ApiRequest, Endpoint, Method};
pub use entity::{EntityStore, LooseId, RecordId, MAX_RECORD_ID};
pub use error::{ErrorBody, StoreError, StoreResult};
pub use kinds::{
    EntityKind, Park, Restaurant, School, Todo, TypedEntity, UcsbDate, UnknownEntityKind,
};
pub use stores::Stores;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
