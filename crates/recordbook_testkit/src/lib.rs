//! # recordbook testkit
//!
//! Test utilities for recordbook.
//!
//! This crate provides:
//! - Record fixtures and pre-seeded store helpers
//! - Property-based test generators using proptest
//! - A model harness that mirrors store operations for verification
//!
//! ## Usage
//!
//! ```rust
//! use recordbook_testkit::prelude::*;
//!
//! with_temp_stores(|stores| {
//!     let parks = stores.parks();
//!     let park = parks.add(recordbook_core::Park::new("Zion", "Utah", 147242)).unwrap();
//!     assert_eq!(park.id, Some(1));
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
