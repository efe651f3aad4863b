//! Typed record shapes for the built-in kinds.

use crate::collection::Record;
use crate::entity::{LooseId, RecordId};
use crate::kinds::EntityKind;
use serde::{Deserialize, Deserializer, Serialize};

/// A record type bound to one of the built-in kinds.
pub trait TypedEntity: Record {
    /// The kind this record type belongs to.
    const KIND: EntityKind;
}

macro_rules! typed_entity {
    ($ty:ident, $kind:expr) => {
        impl Record for $ty {
            fn id(&self) -> LooseId {
                self.id.into()
            }

            fn assign_id(&mut self, id: RecordId) {
                self.id = Some(id);
            }
        }

        impl TypedEntity for $ty {
            const KIND: EntityKind = $kind;
        }
    };
}

/// A national park.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Park {
    /// Store-assigned id.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::entity::id::optional_record_id::deserialize"
    )]
    pub id: Option<RecordId>,
    /// Park name.
    pub name: String,
    /// State the park lies in.
    pub state: String,
    /// Area in acres.
    pub acres: u64,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Park {
    /// Creates an unsaved park.
    pub fn new(name: impl Into<String>, state: impl Into<String>, acres: u64) -> Self {
        Self {
            id: None,
            name: name.into(),
            state: state.into(),
            acres,
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

typed_entity!(Park, EntityKind::Park);

/// A school.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    /// Store-assigned id.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::entity::id::optional_record_id::deserialize"
    )]
    pub id: Option<RecordId>,
    /// School name.
    pub name: String,
    /// School district.
    pub district: String,
    /// Grades taught, e.g. `K-6` or `9-12`.
    pub grade_range: String,
}

impl School {
    /// Creates an unsaved school.
    pub fn new(
        name: impl Into<String>,
        district: impl Into<String>,
        grade_range: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            district: district.into(),
            grade_range: grade_range.into(),
        }
    }
}

typed_entity!(School, EntityKind::School);

/// A restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    /// Store-assigned id.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::entity::id::optional_record_id::deserialize"
    )]
    pub id: Option<RecordId>,
    /// Restaurant name.
    pub name: String,
    /// Cuisine served.
    pub cuisine: String,
    /// Number of roach sightings. Older data stored this under
    /// `"roach counter"`, sometimes as a string.
    #[serde(alias = "roach counter", deserialize_with = "lenient_u32")]
    pub roach_counter: u32,
}

impl Restaurant {
    /// Creates an unsaved restaurant.
    pub fn new(name: impl Into<String>, cuisine: impl Into<String>, roach_counter: u32) -> Self {
        Self {
            id: None,
            name: name.into(),
            cuisine: cuisine.into(),
            roach_counter,
        }
    }
}

typed_entity!(Restaurant, EntityKind::Restaurant);

/// A named date within an academic quarter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UcsbDate {
    /// Store-assigned id.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::entity::id::optional_record_id::deserialize"
    )]
    pub id: Option<RecordId>,
    /// Quarter in `YYYYQ` form, e.g. `20221` for winter 2022.
    #[serde(rename = "quarterYYYYQ")]
    pub quarter_yyyyq: String,
    /// Name of the date.
    pub name: String,
    /// ISO-8601 local date-time, e.g. `2022-01-03T00:00:00`.
    pub local_date_time: String,
}

impl UcsbDate {
    /// Creates an unsaved date.
    pub fn new(
        quarter_yyyyq: impl Into<String>,
        name: impl Into<String>,
        local_date_time: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            quarter_yyyyq: quarter_yyyyq.into(),
            name: name.into(),
            local_date_time: local_date_time.into(),
        }
    }
}

typed_entity!(UcsbDate, EntityKind::UcsbDate);

/// A todo item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Store-assigned id.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::entity::id::optional_record_id::deserialize"
    )]
    pub id: Option<RecordId>,
    /// Short title.
    pub title: String,
    /// Longer description.
    #[serde(default)]
    pub details: String,
    /// Whether the item is done.
    #[serde(default)]
    pub done: bool,
}

impl Todo {
    /// Creates an unsaved, open todo.
    pub fn new(title: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            details: details.into(),
            done: false,
        }
    }
}

typed_entity!(Todo, EntityKind::Todo);

fn lenient_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(u32),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a count, got {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn park_wire_form() {
        let park = Park::new("Yosemite", "California", 761747).with_id(1);
        assert_eq!(
            serde_json::to_value(&park).unwrap(),
            json!({"id": 1, "name": "Yosemite", "state": "California", "acres": 761747})
        );
    }

    #[test]
    fn unsaved_record_omits_id() {
        let school = School::new("Dos Pueblos High School", "Santa Barbara Unified School District", "9-12");
        assert!(school.id().is_absent());
        assert_eq!(
            serde_json::to_value(&school).unwrap(),
            json!({
                "name": "Dos Pueblos High School",
                "district": "Santa Barbara Unified School District",
                "gradeRange": "9-12"
            })
        );
    }

    #[test]
    fn id_stored_as_text_is_accepted() {
        let park: Park =
            serde_json::from_value(json!({"id": "3", "name": "Zion", "state": "Utah", "acres": 147242}))
                .unwrap();
        assert_eq!(park.id, Some(3));
    }

    #[test]
    fn negative_or_fractional_id_is_rejected() {
        for id in [json!(-1), json!(1.5), json!("abc"), json!(true)] {
            let result: Result<Park, _> = serde_json::from_value(
                json!({"id": id, "name": "x", "state": "y", "acres": 1}),
            );
            assert!(result.is_err(), "{id}");
        }
    }

    #[test]
    fn restaurant_accepts_legacy_roach_counter() {
        let legacy: Restaurant = serde_json::from_value(
            json!({"id": 1, "name": "The Habit", "cuisine": "american", "roach counter": "5"}),
        )
        .unwrap();
        assert_eq!(legacy.roach_counter, 5);

        let current: Restaurant = serde_json::from_value(
            json!({"name": "Freebirds", "cuisine": "mexican", "roachCounter": 1}),
        )
        .unwrap();
        assert_eq!(current.roach_counter, 1);
        assert_eq!(
            serde_json::to_value(&current).unwrap()["roachCounter"],
            json!(1)
        );
    }

    #[test]
    fn ucsb_date_field_names() {
        let date = UcsbDate::new("20221", "Noon on January 3", "2022-01-03T12:00:00");
        assert_eq!(
            serde_json::to_value(&date).unwrap(),
            json!({
                "quarterYYYYQ": "20221",
                "name": "Noon on January 3",
                "localDateTime": "2022-01-03T12:00:00"
            })
        );
    }

    #[test]
    fn todo_defaults() {
        let todo: Todo = serde_json::from_value(json!({"title": "groceries"})).unwrap();
        assert_eq!(todo, Todo::new("groceries", ""));
        assert!(!todo.done);
    }

    #[test]
    fn kinds_match_types() {
        assert_eq!(Park::KIND, EntityKind::Park);
        assert_eq!(School::KIND, EntityKind::School);
        assert_eq!(Restaurant::KIND, EntityKind::Restaurant);
        assert_eq!(UcsbDate::KIND, EntityKind::UcsbDate);
        assert_eq!(Todo::KIND, EntityKind::Todo);
    }
}
