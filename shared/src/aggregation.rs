//! Field-wise aggregation over records that expose named numeric fields

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A record that can be read as a list of field names with optional numbers.
///
/// `None` marks a field that is missing or not numeric; aggregation skips it.
pub trait NumericFields {
    fn numeric_fields(&self) -> Vec<(&str, Option<f64>)>;
}

/// Field name to derived scalar, such as an average or maximum across records
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct AggregatedRecord(BTreeMap<String, f64>);

impl AggregatedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<f64> {
        self.0.get(field).copied()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: f64) {
        self.0.insert(field.into(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for AggregatedRecord {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl NumericFields for AggregatedRecord {
    fn numeric_fields(&self) -> Vec<(&str, Option<f64>)> {
        self.iter().map(|(k, v)| (k, Some(v))).collect()
    }
}

impl NumericFields for Map<String, Value> {
    fn numeric_fields(&self) -> Vec<(&str, Option<f64>)> {
        self.iter().map(|(k, v)| (k.as_str(), v.as_f64())).collect()
    }
}

/// Average each field over the records where it is numeric.
///
/// Fields that are never numeric are left out of the result.
pub fn average_numeric_fields<R: NumericFields>(records: &[R]) -> AggregatedRecord {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for record in records {
        for (field, value) in record.numeric_fields() {
            if let Some(value) = value {
                let entry = sums.entry(field.to_string()).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }
    }

    sums.into_iter()
        .map(|(field, (sum, count))| (field, sum / count as f64))
        .collect()
}

/// Maximum of each field over the records where it is numeric.
///
/// Applied to per-window averages this yields the worst window: the riskiest
/// smoothed value of every field across the insured period.
pub fn max_numeric_fields<R: NumericFields>(records: &[R]) -> AggregatedRecord {
    let mut maxima: BTreeMap<String, f64> = BTreeMap::new();

    for record in records {
        for (field, value) in record.numeric_fields() {
            if let Some(value) = value {
                maxima
                    .entry(field.to_string())
                    .and_modify(|current| {
                        if value > *current {
                            *current = value;
                        }
                    })
                    .or_insert(value);
            }
        }
    }

    AggregatedRecord(maxima)
}

/// Absolute difference per field between `observed` and `reference`, for fields
/// numeric on both sides
pub fn absolute_deviation<A, B>(observed: &A, reference: &B) -> AggregatedRecord
where
    A: NumericFields,
    B: NumericFields,
{
    let reference: BTreeMap<&str, f64> = reference
        .numeric_fields()
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .collect();

    observed
        .numeric_fields()
        .into_iter()
        .filter_map(|(field, value)| {
            let value = value?;
            let ideal = reference.get(field)?;
            Some((field.to_string(), (value - ideal).abs()))
        })
        .collect()
}
