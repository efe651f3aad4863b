//! Runtime names for the entity kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string names no entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity kind {0:?} (expected one of: parks, schools, restaurants, ucsbdates, todos)")]
pub struct UnknownEntityKind(pub String);

/// One of the built-in entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// National parks.
    Park,
    /// Schools and their districts.
    School,
    /// Restaurants.
    Restaurant,
    /// Named dates within an academic quarter.
    #[serde(rename = "ucsbdate")]
    UcsbDate,
    /// Todo items.
    Todo,
}

impl EntityKind {
    /// Every kind, in display order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Park,
        EntityKind::School,
        EntityKind::Restaurant,
        EntityKind::UcsbDate,
        EntityKind::Todo,
    ];

    /// Key the kind's collection is stored under.
    #[must_use]
    pub const fn collection_key(self) -> &'static str {
        match self {
            Self::Park => "parks",
            Self::School => "schools",
            Self::Restaurant => "restaurants",
            Self::UcsbDate => "ucsbdates",
            Self::Todo => "todos",
        }
    }

    /// Singular lowercase name used in error messages.
    #[must_use]
    pub const fn entity_name(self) -> &'static str {
        match self {
            Self::Park => "park",
            Self::School => "school",
            Self::Restaurant => "restaurant",
            Self::UcsbDate => "ucsbdate",
            Self::Todo => "todo",
        }
    }

    /// Capitalized name for headings.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Park => "Park",
            Self::School => "School",
            Self::Restaurant => "Restaurant",
            Self::UcsbDate => "UCSB Date",
            Self::Todo => "Todo",
        }
    }

    /// Base path of the kind's REST resource.
    #[must_use]
    pub const fn api_base(self) -> &'static str {
        match self {
            Self::Park => "/api/parks",
            Self::School => "/api/schools",
            Self::Restaurant => "/api/restaurants",
            Self::UcsbDate => "/api/ucsbdates",
            Self::Todo => "/api/todos",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_key())
    }
}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    /// Accepts the collection key or the entity name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| wanted == kind.collection_key() || wanted == kind.entity_name())
            .ok_or_else(|| UnknownEntityKind(s.to_string()))
    }
}
