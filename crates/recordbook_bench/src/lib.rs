//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use recordbook_core::{Park, Stores};
use recordbook_storage::KeyValueStore;

const STATES: [&str; 4] = ["Arizona", "California", "Utah", "Wyoming"];

/// Generate `count` unsaved parks.
pub fn generate_parks(count: usize) -> Vec<Park> {
    (0..count)
        .map(|i| {
            Park::new(format!("Park {i}"), STATES[i % STATES.len()], 1_000 + i as u64)
                .with_description("Benchmark fixture with a description of moderate length.")
        })
        .collect()
}

/// Add `count` parks to the parks collection of `stores`.
pub fn populate<S: KeyValueStore + ?Sized>(stores: &Stores<S>, count: usize) {
    let parks = stores.parks();
    for park in generate_parks(count) {
        parks.add(park).expect("Failed to add park");
    }
}
