//! Lenient coercion of backend values.
//!
//! The backend serializes decimals as strings (`"1250.000"`), sends `null` for
//! empty dates, and occasionally an empty string where a choice is unset. The
//! helpers here turn any of those into `Option`s instead of failing a whole
//! record. The `deserialize_with` adapters are meant to be combined with
//! `#[serde(default)]` so missing fields also decode.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::str::FromStr;

use crate::errors::CoreError;

/// Parse a JSON value as a finite number.
///
/// Accepts JSON numbers and strings holding a number (surrounding whitespace
/// ignored). Everything else, including `NaN`/`inf` spellings, is `None`.
#[must_use]
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => parse_str_number(s),
        _ => None,
    }
}

/// Parse raw text as a finite number.
#[must_use]
pub fn parse_str_number(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|f| f.is_finite())
}

/// Parse a JSON value as an integer id (number or numeric string).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse an ISO `YYYY-MM-DD` date. Timestamps are cut to their date part.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] when the text is not a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = s.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|e| CoreError::Validation(format!("invalid date '{trimmed}': {e}")))
}

/// Missing or unparseable numbers become `0.0`.
///
/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a value at all.
pub fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(parse_number(&value).unwrap_or(0.0))
}

/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a value at all.
pub fn opt_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(parse_number(&value))
}

/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a value at all.
pub fn opt_i64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(parse_id(&value))
}

/// Unknown or blank choice values decode as `None`.
///
/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a value at all.
pub fn opt_enum<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s.trim().parse().ok()),
        _ => Ok(None),
    }
}

/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a value at all.
pub fn opt_date<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(parse_date(&s).ok()),
        _ => Ok(None),
    }
}

/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a value at all.
pub fn opt_bool<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => match s.trim() {
            "true" | "True" | "1" => Some(true),
            "false" | "False" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        _ => None,
    })
}

/// Strings pass through, numbers are rendered, anything else is empty.
///
/// # Errors
///
/// Only fails when the underlying deserializer cannot produce a value at all.
pub fn string_or_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
