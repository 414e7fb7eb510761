//! Response body normalization
//!
//! List endpoints answer with either a bare array or `{ "data": [...] }`.
//! Everything goes through `normalize_list` so call sites never look at the
//! shape themselves.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extract the list items from an array or `data` envelope.
/// Any other shape is treated as an empty list.
pub fn normalize_list(body: Value) -> Vec<Value> {
    match body {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Unwrap a `data` envelope around a single object, if present
pub fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decode items one by one; malformed items are logged and skipped
pub fn decode_items<T: DeserializeOwned>(items: Vec<Value>, label: &str) -> Vec<T> {
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::debug!("Skipping malformed {} item: {}", label, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        tracing::warn!(
            "Dropped {} of {} {} items that did not match the expected shape",
            total - decoded.len(),
            total,
            label
        );
    }
    decoded
}

/// The `message` field of an error body, if the body is JSON and has one
pub fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array_and_envelope_agree() {
        let bare = normalize_list(json!([{"a": 1}, {"a": 2}]));
        let wrapped = normalize_list(json!({"data": [{"a": 1}, {"a": 2}], "count": 2}));
        assert_eq!(bare, wrapped);
        assert_eq!(bare.len(), 2);
    }

    #[test]
    fn test_other_shapes_are_empty() {
        assert!(normalize_list(json!({"data": {"a": 1}})).is_empty());
        assert!(normalize_list(json!({"items": []})).is_empty());
        assert!(normalize_list(json!("nope")).is_empty());
        assert!(normalize_list(Value::Null).is_empty());
    }

    #[test]
    fn test_unwrap_data_only_for_objects() {
        assert_eq!(unwrap_data(json!({"data": {"positive": 80}})), json!({"positive": 80}));
        assert_eq!(unwrap_data(json!({"data": [1, 2]})), json!({"data": [1, 2]}));
        assert_eq!(unwrap_data(json!({"positive": 80})), json!({"positive": 80}));
    }

    #[test]
    fn test_decode_items_skips_bad_rows() {
        #[derive(serde::Deserialize)]
        struct Row {
            n: u32,
        }
        let rows: Vec<Row> = decode_items(vec![json!({"n": 1}), json!({"n": "x"}), json!({"n": 3})], "row");
        assert_eq!(rows.iter().map(|r| r.n).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"message":"Category exists"}"#).as_deref(),
            Some("Category exists")
        );
        assert_eq!(error_message(r#"{"message":"  "}"#), None);
        assert_eq!(error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(error_message(r#"{"error":"x"}"#), None);
    }
}
