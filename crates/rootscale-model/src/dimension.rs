// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_GROUP: &str = "Default";

/// One saved measurement. Records have no id of their own; callers address
/// them by position in the persisted sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub name: String,
    pub value: f64,
    pub group: String,
}

impl DimensionRecord {
    /// Builds a freshly created record: the value is rounded to two decimals
    /// and a blank group falls back to [`DEFAULT_GROUP`].
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64, group: &str) -> Self {
        Self {
            name: name.into(),
            value: round2(value),
            group: crate::normalize_group(group),
        }
    }

    /// Rebuilds a record from a loosely typed JSON object without touching
    /// the value's precision.
    #[must_use]
    pub fn from_loose(name: &Value, value: Option<&Value>, group: Option<&Value>) -> Self {
        let group = match group {
            Some(Value::String(g)) => crate::normalize_group(g),
            _ => DEFAULT_GROUP.to_string(),
        };
        Self {
            name: coerce_name(name),
            value: value.map_or(0.0, coerce_value),
            group,
        }
    }
}

/// Rounds to two decimals from the exact binary value, so `2.675` becomes
/// `2.67` and exact ties go to the even digit. Magnitudes with no fractional
/// part left to round come back unchanged.
#[must_use]
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Best-effort float conversion used when reading stored data. Anything that
/// cannot be read as a finite number becomes `0.0`.
#[must_use]
pub fn coerce_value(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => crate::parse_number(s).unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    }
}

#[must_use]
pub fn coerce_name(raw: &Value) -> String {
    match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
