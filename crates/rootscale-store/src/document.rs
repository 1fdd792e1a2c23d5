// SPDX-License-Identifier: Apache-2.0

use crate::StoreError;
use rootscale_model::DimensionRecord;
use serde_json::Value;
use tracing::warn;

/// Normalizes a stored document into records.
///
/// Two layouts are understood, detected by shape:
/// - legacy mapping `{"Head": 20, ...}`: one record per entry, file order,
///   group `Default`;
/// - current array `[{"name", "value", "group"}, ...]`.
///
/// Unparseable input yields an empty list rather than an error. Nothing is
/// written back here; the normalized form reaches disk on the next save.
#[must_use]
pub fn decode_document(bytes: &[u8]) -> Vec<DimensionRecord> {
    let doc: Value = match serde_json::from_slice(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "dimensions document is not valid json; treating as empty");
            return Vec::new();
        }
    };
    match doc {
        Value::Object(map) => map
            .iter()
            .map(|(name, value)| {
                DimensionRecord::from_loose(&Value::String(name.clone()), Some(value), None)
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| {
                let obj = item.as_object()?;
                Some(DimensionRecord::from_loose(
                    obj.get("name").unwrap_or(&Value::Null),
                    obj.get("value"),
                    obj.get("group"),
                ))
            })
            .collect(),
        other => {
            warn!(
                kind = value_kind(&other),
                "dimensions document has unexpected top-level shape; treating as empty"
            );
            Vec::new()
        }
    }
}

pub fn encode_records(records: &[DimensionRecord]) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(records).map_err(|e| StoreError(e.to_string()))
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
