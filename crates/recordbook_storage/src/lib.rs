//! # recordbook storage
//!
//! The key-value persistence port used by recordbook entity stores.
//!
//! Backends are **opaque string stores**: they map a key to one serialized
//! blob and never interpret the blob. The entity store owns the collection
//! format; a backend only has to hand back exactly what it was given.
//!
//! ## Available Backends
//!
//! - [`InMemoryKeyValueStore`] - For tests and ephemeral sessions
//! - [`FileKeyValueStore`] - One file per key inside a data directory
//!
//! ## Example
//!
//! ```rust
//! use recordbook_storage::{InMemoryKeyValueStore, KeyValueStore};
//!
//! let store = InMemoryKeyValueStore::new();
//! store.set("parks", r#"{"nextId":1,"records":[]}"#).unwrap();
//! assert_eq!(
//!     store.get("parks").unwrap().as_deref(),
//!     Some(r#"{"nextId":1,"records":[]}"#)
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod error;
mod file;
mod key;
mod memory;

pub use backend::KeyValueStore;
pub use error::{StorageError, StorageResult};
pub use file::{FileKeyValueStore, FileOptions};
pub use key::validate_key;
pub use memory::InMemoryKeyValueStore;
