//! Record identifiers and loose id matching.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Identifier assigned by an entity store.
///
/// Ids start at 1, increase by one per `add`, and are never reused.
pub type RecordId = u64;

/// Largest id a store assigns, `2^53 - 1`. Ids up to here survive a
/// round trip through any JSON reader that stores numbers as doubles.
pub const MAX_RECORD_ID: RecordId = (1 << 53) - 1;

/// An id argument compared with *loose equality*.
///
/// Lookups arrive from places that carry ids as text (route parameters,
/// command-line arguments) while stored ids are numbers. `LooseId` keeps
/// whatever form the caller supplied and compares it against stored ids
/// with coercion:
///
/// - number vs number compares numerically
/// - text vs text compares exactly
/// - number vs text parses the trimmed text as a number; empty or
///   non-numeric text never equals a number (unlike JavaScript `==`,
///   where `"" == 0` holds; stores never assign id 0)
///
/// [`LooseId::Absent`] stands for a missing argument and matches nothing.
///
/// ```rust
/// use recordbook_core::LooseId;
///
/// assert!(LooseId::from(2u64).matches(&LooseId::from("2")));
/// assert!(LooseId::from(" 2 ").matches(&LooseId::from(2u64)));
/// assert!(!LooseId::from("two").matches(&LooseId::from(2u64)));
/// assert!(!LooseId::Absent.matches(&LooseId::Absent));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LooseId {
    /// No id was supplied.
    #[default]
    Absent,
    /// An integral id.
    Integer(i64),
    /// A non-integral or out-of-range numeric id.
    Float(f64),
    /// An id given as text.
    Text(String),
}

impl LooseId {
    /// Returns `true` if no id was supplied.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns the numeric value of this id, coercing text.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Absent => None,
            Self::Integer(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            Self::Text(s) => parse_numeric(s),
        }
    }

    /// Returns this id as a store-assigned [`RecordId`], if it is one.
    #[must_use]
    pub fn as_record_id(&self) -> Option<RecordId> {
        match self {
            Self::Integer(n) => RecordId::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Compares two ids with loose equality.
    #[must_use]
    pub fn matches(&self, other: &LooseId) -> bool {
        match (self, other) {
            (Self::Absent, _) | (_, Self::Absent) => false,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    /// Reads the id of a stored JSON value.
    ///
    /// Anything other than a number or a string is treated as absent.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else {
                    n.as_f64().map_or(Self::Absent, Self::Float)
                }
            }
            Value::String(s) => Self::Text(s.clone()),
            _ => Self::Absent,
        }
    }

    /// Converts this id back to JSON. Absent ids become `null`.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Absent => Value::Null,
            Self::Integer(n) => Value::from(*n),
            Self::Float(f) => Value::from(*f),
            Self::Text(s) => Value::String(s.clone()),
        }
    }
}

fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

impl fmt::Display for LooseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("undefined"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for LooseId {
    fn from(id: u64) -> Self {
        i64::try_from(id).map_or(Self::Float(id as f64), Self::Integer)
    }
}

impl From<u32> for LooseId {
    fn from(id: u32) -> Self {
        Self::Integer(i64::from(id))
    }
}

impl From<usize> for LooseId {
    fn from(id: usize) -> Self {
        Self::from(id as u64)
    }
}

impl From<i64> for LooseId {
    fn from(id: i64) -> Self {
        Self::Integer(id)
    }
}

impl From<i32> for LooseId {
    fn from(id: i32) -> Self {
        Self::Integer(i64::from(id))
    }
}

impl From<f64> for LooseId {
    fn from(id: f64) -> Self {
        if id.fract() == 0.0 && id.abs() < 9.007_199_254_740_992e15 {
            Self::Integer(id as i64)
        } else {
            Self::Float(id)
        }
    }
}

impl From<&str> for LooseId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

impl From<String> for LooseId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

impl From<&String> for LooseId {
    fn from(id: &String) -> Self {
        Self::Text(id.clone())
    }
}

impl From<&Value> for LooseId {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

impl From<Value> for LooseId {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl From<&LooseId> for LooseId {
    fn from(id: &LooseId) -> Self {
        id.clone()
    }
}

impl<T: Into<LooseId>> From<Option<T>> for LooseId {
    fn from(id: Option<T>) -> Self {
        id.map_or(Self::Absent, Into::into)
    }
}

impl Serialize for LooseId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LooseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_json(&Value::deserialize(deserializer)?))
    }
}

/// Serde helpers for an optional [`RecordId`] field that tolerates ids
/// stored as numeric strings.
pub(crate) mod optional_record_id {
    use super::{LooseId, RecordId};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<RecordId>, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        let Some(value) = value else {
            return Ok(None);
        };
        let id = LooseId::from_json(&value);
        if id.is_absent() {
            return Err(D::Error::custom(format!("invalid record id {value}")));
        }
        let n = id
            .as_number()
            .ok_or_else(|| D::Error::custom(format!("record id {value} is not numeric")))?;
        if n < 0.0 || n.fract() != 0.0 || n > u64::MAX as f64 {
            return Err(D::Error::custom(format!(
                "record id {value} is not a non-negative integer"
            )));
        }
        Ok(Some(n as RecordId))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_id_equals_its_string_form() {
        // Route parameters arrive as text; stored ids are numbers.
        assert!(LooseId::from(2u64).matches(&LooseId::from("2")));
        assert!(LooseId::from("2").matches(&LooseId::from(2i64)));
    }

    #[test]
    fn coercion_trims_and_parses_decimals() {
        assert!(LooseId::from(2u64).matches(&LooseId::from(" 2 ")));
        assert!(LooseId::from(2u64).matches(&LooseId::from("2.0")));
        assert!(LooseId::from(2u64).matches(&LooseId::from("02")));
    }

    #[test]
    fn text_vs_text_is_exact() {
        assert!(LooseId::from("abc").matches(&LooseId::from("abc")));
        assert!(!LooseId::from("2").matches(&LooseId::from("02")));
    }

    #[test]
    fn non_numeric_text_never_matches_number() {
        assert!(!LooseId::from(0u64).matches(&LooseId::from("")));
        assert!(!LooseId::from(0u64).matches(&LooseId::from("   ")));
        assert!(!LooseId::from(2u64).matches(&LooseId::from("two")));
        assert!(!LooseId::from(2u64).matches(&LooseId::from("NaN")));
    }

    #[test]
    fn absent_matches_nothing() {
        assert!(!LooseId::Absent.matches(&LooseId::Absent));
        assert!(!LooseId::Absent.matches(&LooseId::from(1u64)));
        assert!(!LooseId::from(1u64).matches(&LooseId::Absent));
    }

    #[test]
    fn option_conversion() {
        assert_eq!(LooseId::from(None::<u64>), LooseId::Absent);
        assert_eq!(LooseId::from(Some(3u64)), LooseId::Integer(3));
    }

    #[test]
    fn json_conversion() {
        assert_eq!(LooseId::from_json(&json!(7)), LooseId::Integer(7));
        assert_eq!(LooseId::from_json(&json!("7")), LooseId::Text("7".into()));
        assert_eq!(LooseId::from_json(&json!(null)), LooseId::Absent);
        assert_eq!(LooseId::from_json(&json!(true)), LooseId::Absent);
        assert_eq!(LooseId::from_json(&json!(1.5)), LooseId::Float(1.5));
    }

    #[test]
    fn display_keeps_caller_form() {
        assert_eq!(LooseId::from(99u64).to_string(), "99");
        assert_eq!(LooseId::from("x7").to_string(), "x7");
        assert_eq!(LooseId::Absent.to_string(), "undefined");
    }

    #[test]
    fn as_record_id() {
        assert_eq!(LooseId::from(4u64).as_record_id(), Some(4));
        assert_eq!(LooseId::from(-4i64).as_record_id(), None);
        assert_eq!(LooseId::from("4").as_record_id(), None);
    }

    #[test]
    fn float_conversion_normalizes_integral_values() {
        assert_eq!(LooseId::from(3.0f64), LooseId::Integer(3));
        assert_eq!(LooseId::from(3.5f64), LooseId::Float(3.5));
    }

    proptest::proptest! {
        #[test]
        fn number_matches_its_decimal_text(n in 0u64..(1 << 53)) {
            proptest::prop_assert!(LooseId::from(n).matches(&LooseId::from(n.to_string())));
            proptest::prop_assert!(!LooseId::from(n).matches(&LooseId::from((n + 1).to_string())));
        }

        #[test]
        fn matching_is_symmetric(a in 0i64..100, b in "[0-9 ]{0,4}") {
            let x = LooseId::from(a);
            let y = LooseId::from(b);
            proptest::prop_assert_eq!(x.matches(&y), y.matches(&x));
        }
    }
}
