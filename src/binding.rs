//! Host data-binding boundary
//!
//! Decodes the JSON payload a dashboard host sends into typed `RawRow`s.
//! Two payload shapes are accepted:
//!
//! ```text
//! [ {"step": "Step 1: Visit", "users": 1000, "stepOrder": "1"}, ... ]
//! {"tables": {"DEFAULT": [ {"step": ["Step 1: Visit"], "users": [1000]}, ... ]}}
//! ```
//!
//! Field values may be bare scalars or single-element arrays (hosts wrap
//! every dimension and metric value in an array). Structural problems are
//! `FunnelError::InvalidShape`. Everything else falls back quietly.

use crate::error::{FunnelError, Result};
use crate::types::{coerce_count, OrderHint, RawRow};
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Field holding the step label
pub const STEP_FIELD: &str = "step";
/// Field holding the count metric
pub const COUNT_FIELD: &str = "users";
/// Optional field holding the explicit step order
pub const ORDER_FIELD: &str = "stepOrder";

/// Decode rows from a host payload.
pub fn rows_from_value(payload: &Value) -> Result<Vec<RawRow>> {
    let table = table_rows(payload)?;
    table
        .iter()
        .enumerate()
        .map(|(index, row)| row_from_value(index, row))
        .collect()
}

/// Decode rows from any JSON reader.
pub fn rows_from_reader<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let payload: Value = serde_json::from_reader(reader)?;
    rows_from_value(&payload)
}

/// Decode rows from a JSON file.
pub fn rows_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path.as_ref())?;
    rows_from_reader(std::io::BufReader::new(file))
}

fn table_rows(payload: &Value) -> Result<&Vec<Value>> {
    match payload {
        Value::Array(rows) => Ok(rows),
        Value::Object(obj) => obj
            .get("tables")
            .and_then(|tables| tables.get("DEFAULT"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                FunnelError::invalid_shape("expected an array of rows or tables.DEFAULT")
            }),
        other => Err(FunnelError::invalid_shape(format!(
            "expected an array of rows, got {}",
            json_kind(other)
        ))),
    }
}

fn row_from_value(index: usize, row: &Value) -> Result<RawRow> {
    let obj = row.as_object().ok_or_else(|| {
        FunnelError::invalid_shape(format!("row {} is {}, not an object", index, json_kind(row)))
    })?;

    if !obj.contains_key(STEP_FIELD) {
        return Err(FunnelError::invalid_shape(format!(
            "row {} has no '{}' field",
            index, STEP_FIELD
        )));
    }
    let step_label = field(obj, STEP_FIELD).map(label_text).unwrap_or_default();

    let count = match field(obj, COUNT_FIELD).and_then(count_value) {
        Some(count) => count,
        None => {
            debug!(row = index, label = %step_label, "Missing or unparseable count, using 0");
            0.0
        }
    };

    let step_order_hint = field(obj, ORDER_FIELD).and_then(order_hint);
    if step_order_hint.is_none() {
        debug!(row = index, label = %step_label, "No order hint, inferring from label");
    }

    Ok(RawRow {
        step_label,
        step_order_hint,
        count,
    })
}

/// Field value with one level of array wrapping removed. Null counts as absent.
fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    let value = match obj.get(name)? {
        Value::Array(items) => items.first()?,
        other => other,
    };
    (!value.is_null()).then_some(value)
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn count_value(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    Some(coerce_count(raw))
}

fn order_hint(value: &Value) -> Option<OrderHint> {
    match value {
        Value::Number(n) => n.as_f64().map(OrderHint::Number),
        Value::String(s) => Some(OrderHint::Text(s.clone())),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_rows() {
        let rows = rows_from_value(&json!([
            {"step": "Step 1: Visit", "users": 1000},
            {"step": "Checkout", "users": 40, "stepOrder": "2"},
        ]))
        .expect("valid rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].step_label, "Step 1: Visit");
        assert_eq!(rows[0].count, 1000.0);
        assert_eq!(rows[0].step_order_hint, None);
        assert_eq!(rows[1].step_order_hint, Some(OrderHint::from("2")));
    }

    #[test]
    fn test_host_table_payload() {
        let rows = rows_from_value(&json!({
            "tables": {"DEFAULT": [
                {"step": ["Step 1: Visit"], "users": [1000], "stepOrder": [1]},
                {"step": ["Step 2: Signup"], "users": [400]},
            ]},
            "style": {}
        }))
        .expect("valid payload");
        assert_eq!(rows[0].step_order_hint, Some(OrderHint::Number(1.0)));
        assert_eq!(rows[1].count, 400.0);
    }

    #[test]
    fn test_count_fallbacks() {
        let rows = rows_from_value(&json!([
            {"step": "a"},
            {"step": "b", "users": "12.5"},
            {"step": "c", "users": "lots"},
            {"step": "d", "users": -4},
            {"step": "e", "users": null},
            {"step": "f", "users": []},
        ]))
        .expect("valid rows");
        let counts: Vec<f64> = rows.iter().map(|r| r.count).collect();
        assert_eq!(counts, [0.0, 12.5, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_null_order_is_absent() {
        let rows = rows_from_value(&json!([{"step": "x", "users": 1, "stepOrder": null}]))
            .expect("valid rows");
        assert_eq!(rows[0].step_order_hint, None);
    }

    #[test]
    fn test_non_string_label_is_stringified() {
        let rows = rows_from_value(&json!([{"step": 3, "users": 1}])).expect("valid rows");
        assert_eq!(rows[0].step_label, "3");
    }

    #[test]
    fn test_shape_violations() {
        for payload in [
            json!(42),
            json!("rows"),
            json!({"tables": {}}),
            json!({"tables": {"DEFAULT": {"step": "x"}}}),
            json!([1, 2]),
            json!([{"users": 5}]),
        ] {
            let err = rows_from_value(&payload).unwrap_err();
            assert!(err.is_contract_violation(), "payload {} should be rejected", payload);
        }
    }

    #[test]
    fn test_rows_from_reader() {
        let data = br#"[{"step": "Step 1", "users": 7}]"#;
        let rows = rows_from_reader(&data[..]).expect("valid json");
        assert_eq!(rows[0].count, 7.0);
    }

    #[test]
    fn test_rows_from_reader_bad_json() {
        let err = rows_from_reader(&b"{not json"[..]).unwrap_err();
        assert!(matches!(err, FunnelError::Json(_)));
    }
}
