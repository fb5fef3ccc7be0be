//! Normalizes the storefront's response envelopes.
//!
//! Endpoints answer in one of three shapes:
//!
//! - `{"result": "success", "data": ...}`
//! - `{"success": true, "data": ...}`
//! - the bare payload (array or object)
//!
//! A failure envelope (`"result"` other than `"success"`, or
//! `"success": false`) becomes [`ClientError::Api`] carrying the server's
//! `message` or `error` text.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ClientError;

/// Strips the envelope and returns the payload.
///
/// # Errors
///
/// Returns [`ClientError::Api`] when the envelope reports failure.
pub fn unwrap_data(body: Value, context: &str) -> Result<Value, ClientError> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };

    let result_failed = map
        .get("result")
        .and_then(Value::as_str)
        .is_some_and(|r| !r.eq_ignore_ascii_case("success"));
    let success_false = map.get("success").and_then(Value::as_bool) == Some(false);

    if result_failed || success_false {
        let message = ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .unwrap_or("request was not successful")
            .to_owned();
        return Err(ClientError::Api {
            context: context.to_owned(),
            message,
        });
    }

    let is_envelope = map.contains_key("result") || map.contains_key("success");
    match map.remove("data") {
        Some(data) => Ok(data),
        None if is_envelope => Ok(Value::Null),
        None => Ok(Value::Object(map)),
    }
}

/// Decodes a list payload.
///
/// A missing payload is an empty list. Entries that do not match `T` are
/// skipped with a debug log so one malformed row cannot hide its siblings.
///
/// # Errors
///
/// Returns [`ClientError::Api`] for failure envelopes and
/// [`ClientError::UnexpectedShape`] when the payload is not an array.
pub fn decode_list<T: DeserializeOwned>(body: Value, context: &str) -> Result<Vec<T>, ClientError> {
    match unwrap_data(body, context)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => {
            let total = items.len();
            let decoded: Vec<T> = items
                .into_iter()
                .filter_map(|item| match serde_json::from_value::<T>(item) {
                    Ok(v) => Some(v),
                    Err(e) => {
                        tracing::debug!(context, error = %e, "skipping malformed list entry");
                        None
                    }
                })
                .collect();
            if decoded.len() < total {
                tracing::warn!(
                    context,
                    skipped = total - decoded.len(),
                    total,
                    "some list entries could not be decoded"
                );
            }
            Ok(decoded)
        }
        other => Err(ClientError::UnexpectedShape {
            context: context.to_owned(),
            reason: format!("expected an array, found {}", json_kind(&other)),
        }),
    }
}

/// Decodes a single-object payload. A missing payload or an empty array is
/// `None`; a non-empty array yields its first element.
///
/// # Errors
///
/// Returns [`ClientError::Api`] for failure envelopes and
/// [`ClientError::Deserialize`] when the object does not match `T`.
pub fn decode_one<T: DeserializeOwned>(body: Value, context: &str) -> Result<Option<T>, ClientError> {
    let payload = match unwrap_data(body, context)? {
        Value::Null => return Ok(None),
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => first,
            None => return Ok(None),
        },
        other => other,
    };

    serde_json::from_value(payload)
        .map(Some)
        .map_err(|e| ClientError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: u32,
    }

    #[test]
    fn result_success_envelope_is_unwrapped() {
        let rows: Vec<Row> =
            decode_list(json!({"result": "success", "data": [{"id": 1}]}), "rows").unwrap();
        assert_eq!(rows, vec![Row { id: 1 }]);
    }

    #[test]
    fn success_true_envelope_is_unwrapped() {
        let rows: Vec<Row> =
            decode_list(json!({"success": true, "data": [{"id": 2}]}), "rows").unwrap();
        assert_eq!(rows, vec![Row { id: 2 }]);
    }

    #[test]
    fn raw_array_is_accepted() {
        let rows: Vec<Row> = decode_list(json!([{"id": 3}, {"id": 4}]), "rows").unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn envelope_without_data_is_empty_list() {
        let rows: Vec<Row> = decode_list(json!({"success": true}), "rows").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn failure_envelopes_become_api_errors() {
        let err = decode_list::<Row>(
            json!({"result": "error", "message": "look not found"}),
            "images",
        )
        .unwrap_err();
        assert!(
            matches!(err, ClientError::Api { ref message, .. } if message == "look not found"),
            "got {err:?}"
        );

        let err = decode_list::<Row>(json!({"success": false}), "images").unwrap_err();
        assert!(matches!(err, ClientError::Api { .. }));
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let rows: Vec<Row> =
            decode_list(json!([{"id": 1}, {"id": "nope"}, {"id": 5}]), "rows").unwrap();
        assert_eq!(rows, vec![Row { id: 1 }, Row { id: 5 }]);
    }

    #[test]
    fn object_payload_for_list_is_unexpected_shape() {
        let err = decode_list::<Row>(json!({"success": true, "data": {"id": 1}}), "rows")
            .unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedShape { .. }));
    }

    #[test]
    fn decode_one_accepts_object_array_and_null() {
        let one: Option<Row> =
            decode_one(json!({"result": "success", "data": {"id": 7}}), "row").unwrap();
        assert_eq!(one, Some(Row { id: 7 }));

        let first: Option<Row> = decode_one(json!([{"id": 8}, {"id": 9}]), "row").unwrap();
        assert_eq!(first, Some(Row { id: 8 }));

        let none: Option<Row> = decode_one(json!({"success": true, "data": null}), "row").unwrap();
        assert!(none.is_none());

        let empty: Option<Row> = decode_one(json!([]), "row").unwrap();
        assert!(empty.is_none());
    }

    #[test]
    fn bare_object_passes_through() {
        let value = unwrap_data(json!({"styles": ["Boho"]}), "filters").unwrap();
        assert_eq!(value["styles"][0], "Boho");
    }
}
