//! Raw form input and its coercion into payload values.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::{Value, json};
use uni_core::lenient::{parse_date, parse_str_number};

/// The text a user has typed into a form, field by field.
///
/// Values loaded from an existing record form the baseline; a field is
/// *changed* once [`set`](Self::set) gives it a value different from that
/// baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    values: BTreeMap<String, String>,
    initial: BTreeMap<String, String>,
}

impl Draft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft whose baseline is `pairs`.
    #[must_use]
    pub fn with_initial<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let initial: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            values: initial.clone(),
            initial,
        }
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// Trimmed value, `""` when unset.
    #[must_use]
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map_or("", |v| v.trim())
    }

    /// Value exactly as typed.
    #[must_use]
    pub fn raw(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    #[must_use]
    pub fn is_blank(&self, field: &str) -> bool {
        self.get(field).is_empty()
    }

    #[must_use]
    pub fn is_changed(&self, field: &str) -> bool {
        self.get(field) != self.initial.get(field).map_or("", |v| v.trim())
    }

    pub fn changed_fields(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|f| self.is_changed(f))
    }

    #[must_use]
    pub fn number(&self, field: &str) -> Option<f64> {
        parse_str_number(self.get(field))
    }

    /// Whole-number value; `"3.0"` is accepted, `"3.5"` is not.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn integer(&self, field: &str) -> Option<i64> {
        self.number(field)
            .filter(|n| n.fract() == 0.0 && n.abs() < 9.0e15)
            .map(|n| n as i64)
    }

    #[must_use]
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        parse_date(self.get(field)).ok()
    }

    #[must_use]
    pub fn choice<T: FromStr>(&self, field: &str) -> Option<T> {
        self.get(field).parse().ok()
    }

    // -- payload values ----------------------------------------------------

    #[must_use]
    pub fn text_value(&self, field: &str) -> Value {
        Value::String(self.get(field).to_string())
    }

    /// `null` when blank.
    #[must_use]
    pub fn nullable_text(&self, field: &str) -> Value {
        if self.is_blank(field) {
            Value::Null
        } else {
            self.text_value(field)
        }
    }

    /// `null` when not a number.
    #[must_use]
    pub fn number_value(&self, field: &str) -> Value {
        self.number(field).map_or(Value::Null, |n| json!(n))
    }

    #[must_use]
    pub fn number_or(&self, field: &str, default: f64) -> Value {
        json!(self.number(field).unwrap_or(default))
    }

    /// `null` when not a whole number.
    #[must_use]
    pub fn integer_value(&self, field: &str) -> Value {
        self.integer(field).map_or(Value::Null, |n| json!(n))
    }
}

// -- prefill helpers -------------------------------------------------------

pub(crate) fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

pub(crate) fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

pub(crate) fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

pub(crate) fn opt_text<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Object body of a `json!({...})` literal.
pub(crate) fn object(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}
