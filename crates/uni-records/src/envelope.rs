//! Response envelope normalization.
//!
//! List endpoints answer with any of a handful of shapes:
//!
//! ```text
//! [ {...}, {...} ]                              bare array
//! { "count": 2, "results": [ ... ] }            paginated
//! { "data": [ ... ] }                           wrapped
//! { "success": true, "data": [ ... ], "count" } wrapped with status
//! { "success": true, "data": { "results": [...] } }  nested one level
//! ```
//!
//! [`normalize`] maps all of them to one ordered item list plus a total. Bodies
//! that match nothing become an empty list; nothing in this module fails.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uni_core::lenient::parse_id;

/// Items extracted from a response body, in response order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Normalized {
    pub items: Vec<Value>,
    /// The server's `count` when it sent one, else the number of items.
    /// Always `Some` for bodies that went through [`normalize`].
    pub total: Option<u64>,
}

/// Typed view of a normalized list.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl Normalized {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Some(0),
        }
    }

    fn from_items(items: &[Value], count: Option<u64>) -> Self {
        let total = count.unwrap_or(items.len() as u64);
        Self {
            items: items.to_vec(),
            total: Some(total),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Decode every item as `T`. Items that do not decode are skipped.
    #[must_use]
    pub fn decode<T: DeserializeOwned>(&self) -> Vec<T> {
        self.items
            .iter()
            .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
                Ok(record) => Some(record),
                Err(error) => {
                    tracing::warn!(%error, "skipping record that failed to decode");
                    None
                }
            })
            .collect()
    }

    #[must_use]
    pub fn into_listing<T: DeserializeOwned>(self) -> Listing<T> {
        let items = self.decode();
        Listing {
            total: self.total.unwrap_or(items.len() as u64),
            items,
        }
    }
}

/// Extract the list payload from a response body of unknown shape.
#[must_use]
pub fn normalize(body: &Value) -> Normalized {
    normalize_with(body, &[])
}

/// Like [`normalize`], but tries the named fields, in order, before falling
/// back to scanning for the first array-valued field.
#[must_use]
pub fn normalize_with(body: &Value, array_fields: &[&str]) -> Normalized {
    normalize_level(body, array_fields, true)
}

fn normalize_level(body: &Value, array_fields: &[&str], allow_nested: bool) -> Normalized {
    let obj = match body {
        Value::Array(items) => return Normalized::from_items(items, None),
        Value::Object(obj) => obj,
        _ => return Normalized::empty(),
    };

    if obj.get("success") == Some(&Value::Bool(false)) {
        return Normalized::empty();
    }

    let count = obj.get("count").and_then(parse_count);

    if let Some(Value::Array(items)) = obj.get("results") {
        return Normalized::from_items(items, count);
    }

    match obj.get("data") {
        Some(Value::Array(items)) => return Normalized::from_items(items, count),
        Some(inner @ Value::Object(inner_obj)) if allow_nested && is_list_envelope(inner_obj) => {
            let mut nested = normalize_level(inner, array_fields, false);
            if count.is_some() {
                nested.total = count;
            }
            return nested;
        }
        _ => {}
    }

    for field in array_fields {
        if let Some(Value::Array(items)) = obj.get(*field) {
            return Normalized::from_items(items, count);
        }
    }

    if let Some(items) = obj.values().find_map(Value::as_array) {
        return Normalized::from_items(items, None);
    }

    tracing::warn!(
        keys = ?obj.keys().collect::<Vec<_>>(),
        "response body has no list payload; treating as empty"
    );
    Normalized::empty()
}

fn is_list_envelope(obj: &Map<String, Value>) -> bool {
    obj.get("data").is_some_and(Value::is_array) || obj.get("results").is_some_and(Value::is_array)
}

fn parse_count(value: &Value) -> Option<u64> {
    parse_id(value).and_then(|n| u64::try_from(n).ok())
}

/// Extract a single record from a mutation or detail response.
///
/// ```text
/// { "id": 3, ... }                        → the body itself
/// { "success": true, "data": { ... } }    → data
/// { "data": { ... } }                     → data
/// { "success": false, ... }               → None
/// ```
///
/// Anything that is not an object is `None`.
#[must_use]
pub fn normalize_record(body: &Value) -> Option<Value> {
    let obj = body.as_object()?;
    if obj.get("success") == Some(&Value::Bool(false)) {
        return None;
    }
    if !obj.contains_key("id")
        && let Some(data @ Value::Object(_)) = obj.get("data")
    {
        return Some(data.clone());
    }
    Some(body.clone())
}
