//! Serde helpers for backend identifiers.
//!
//! The storefront API is inconsistent about identifier types: the same field
//! arrives as `"42"` from one endpoint and `42` from another. Identifiers are
//! opaque to the client, so both forms are read into a `String`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
    Float(f64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s.trim().to_owned(),
            RawId::Int(n) => n.to_string(),
            RawId::Float(f) => f.to_string(),
        }
    }
}

/// Reads a required identifier that may be encoded as a string or a number.
///
/// # Errors
///
/// Fails when the value is neither a string nor a number.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(RawId::into_string)
}

/// Reads an optional identifier. `null`, absent and blank values become `None`.
///
/// # Errors
///
/// Fails when the value is present but neither a string nor a number.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawId>::deserialize(deserializer)?;
    Ok(raw.map(RawId::into_string).filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "super::opt_string_or_number")]
        product_id: Option<String>,
    }

    #[test]
    fn numeric_id_becomes_string() {
        let row: Row = serde_json::from_str(r#"{"id": 17, "product_id": 99}"#).unwrap();
        assert_eq!(row.id, "17");
        assert_eq!(row.product_id.as_deref(), Some("99"));
    }

    #[test]
    fn string_id_is_trimmed() {
        let row: Row = serde_json::from_str(r#"{"id": " abc ", "product_id": "p1"}"#).unwrap();
        assert_eq!(row.id, "abc");
        assert_eq!(row.product_id.as_deref(), Some("p1"));
    }

    #[test]
    fn null_blank_and_missing_optional_ids_are_none() {
        let row: Row = serde_json::from_str(r#"{"id": "1", "product_id": null}"#).unwrap();
        assert!(row.product_id.is_none());
        let row: Row = serde_json::from_str(r#"{"id": "1", "product_id": ""}"#).unwrap();
        assert!(row.product_id.is_none());
        let row: Row = serde_json::from_str(r#"{"id": "1"}"#).unwrap();
        assert!(row.product_id.is_none());
    }
}
