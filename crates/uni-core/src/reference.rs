use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lenient::parse_id;

/// A foreign key as it appears inside a record.
///
/// The backend is inconsistent about how it embeds related entities: the same
/// `student` field can hold `12`, `"12"`, `"IT2024012"`, `"Amine Ben Ali"` or a
/// nested `{ "id": 12, "student_id": "IT2024012", ... }`. Every JSON value maps
/// to exactly one variant; shapes that carry no usable key become
/// [`EntityRef::Unrecognized`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum EntityRef {
    /// Integer primary key.
    Id(i64),
    /// Non-empty text: a numeric string, a business key, or a display name.
    Text(String),
    /// Nested object, as embedded by detail serializers.
    Object(Map<String, Value>),
    /// `null`, booleans, arrays, empty strings, non-integral numbers.
    #[default]
    Unrecognized,
}

impl EntityRef {
    /// The primary key this reference carries, if any.
    ///
    /// Numeric text and an object's `id` field both count.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Text(text) => text.trim().parse().ok(),
            Self::Object(map) => map.get("id").and_then(parse_id),
            Self::Unrecognized => None,
        }
    }

    /// A string-valued field of a nested object.
    #[must_use]
    pub fn object_str(&self, field: &str) -> Option<&str> {
        match self {
            Self::Object(map) => map
                .get(field)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unrecognized(&self) -> bool {
        matches!(self, Self::Unrecognized)
    }
}

impl From<Value> for EntityRef {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(_) => parse_id(&value).map_or(Self::Unrecognized, Self::Id),
            Value::String(s) if s.trim().is_empty() => Self::Unrecognized,
            Value::String(s) => Self::Text(s),
            Value::Object(map) => Self::Object(map),
            Value::Null | Value::Bool(_) | Value::Array(_) => Self::Unrecognized,
        }
    }
}

impl From<&Value> for EntityRef {
    fn from(value: &Value) -> Self {
        Self::from(value.clone())
    }
}

impl From<EntityRef> for Value {
    fn from(reference: EntityRef) -> Self {
        match reference {
            EntityRef::Id(id) => Self::from(id),
            EntityRef::Text(s) => Self::String(s),
            EntityRef::Object(map) => Self::Object(map),
            EntityRef::Unrecognized => Self::Null,
        }
    }
}

impl From<i64> for EntityRef {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}
