//! Group-by statistics over in-memory records.
//!
//! Every derived number shown for a list (sums per category, counts per
//! status, averages, shares of a total) goes through [`aggregate`], so all of
//! them share one coercion and zero-division policy:
//!
//! - a value that is not a finite number counts as `0` for `Sum`/`Avg` but the
//!   record still counts for `Count` and for the `Avg` denominator;
//! - a zero (or non-finite) denominator yields `0`;
//! - groups come out in the order their key was first seen.

use serde::Serialize;
use serde::ser::SerializeMap;
use serde_json::Value;
use uni_core::lenient::parse_number;

/// What to compute per group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Sum,
    Count,
    Avg,
    /// Group sum as a percentage of the given denominator.
    PercentOf(f64),
}

type KeyFn<'a, R> = Box<dyn Fn(&R) -> String + 'a>;
type ValueFn<'a, R> = Box<dyn Fn(&R) -> Option<f64> + 'a>;

/// Grouping key, value extractor and operation for [`aggregate`].
///
/// Without a grouping key every record falls in a single group named
/// [`AggregationSpec::ALL`]. Without a value extractor every value is `0`.
pub struct AggregationSpec<'a, R> {
    group_by: Option<KeyFn<'a, R>>,
    value: Option<ValueFn<'a, R>>,
    operation: Operation,
}

impl<'a, R> AggregationSpec<'a, R> {
    pub const ALL: &'static str = "all";

    #[must_use]
    pub fn new(operation: Operation) -> Self {
        Self {
            group_by: None,
            value: None,
            operation,
        }
    }

    #[must_use]
    pub fn group_by(mut self, key: impl Fn(&R) -> String + 'a) -> Self {
        self.group_by = Some(Box::new(key));
        self
    }

    #[must_use]
    pub fn value(mut self, value: impl Fn(&R) -> Option<f64> + 'a) -> Self {
        self.value = Some(Box::new(value));
        self
    }

    fn key_of(&self, record: &R) -> String {
        self.group_by
            .as_ref()
            .map_or_else(|| Self::ALL.to_string(), |key| key(record))
    }

    fn value_of(&self, record: &R) -> f64 {
        self.value
            .as_ref()
            .and_then(|value| value(record))
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

impl<'a> AggregationSpec<'a, Value> {
    /// Group JSON records by a field. Missing fields group under `""`;
    /// non-string values are grouped by their JSON text.
    #[must_use]
    pub fn group_by_field(self, field: &'a str) -> Self {
        self.group_by(move |record| match record.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        })
    }

    /// Take a JSON field as the value, accepting numbers and numeric strings.
    #[must_use]
    pub fn value_field(self, field: &'a str) -> Self {
        self.value(move |record| record.get(field).and_then(parse_number))
    }
}

/// Ordered group → number results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    entries: Vec<(String, f64)>,
}

impl Aggregates {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }

    /// Value for `key`, `0` when the group never appeared.
    #[must_use]
    pub fn get_or_zero(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all group values.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }
}

impl Serialize for Aggregates {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[derive(Default)]
struct GroupState {
    sum: f64,
    count: u64,
}

/// Run `spec` over `records`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn aggregate<R>(records: &[R], spec: &AggregationSpec<'_, R>) -> Aggregates {
    let mut groups: Vec<(String, GroupState)> = Vec::new();

    for record in records {
        let key = spec.key_of(record);
        let value = spec.value_of(record);
        let idx = match groups.iter().position(|(k, _)| *k == key) {
            Some(idx) => idx,
            None => {
                groups.push((key, GroupState::default()));
                groups.len() - 1
            }
        };
        let state = &mut groups[idx].1;
        state.sum += value;
        state.count += 1;
    }

    let entries = groups
        .into_iter()
        .map(|(key, state)| {
            let result = match spec.operation {
                Operation::Sum => state.sum,
                Operation::Count => state.count as f64,
                Operation::Avg => ratio(state.sum, state.count as f64),
                Operation::PercentOf(denominator) => percent_of(state.sum, denominator),
            };
            (key, result)
        })
        .collect();

    Aggregates { entries }
}

/// `numerator / denominator * 100`, or `0` when the denominator is zero or
/// either side is not finite.
#[must_use]
pub fn percent_of(numerator: f64, denominator: f64) -> f64 {
    ratio(numerator, denominator) * 100.0
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    numerator / denominator
}
