//! Serde helpers for partial-update payloads.

use serde::{Deserialize, Deserializer};

/// Distinguish an explicit `null` from an absent field.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_some")]` on an
/// `Option<Option<T>>` field: absent → `None`, `null` → `Some(None)`,
/// value → `Some(Some(v))`.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        category: Option<Option<String>>,
    }

    #[test]
    fn absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        let null: Patch = serde_json::from_str(r#"{"category": null}"#).unwrap();
        let value: Patch = serde_json::from_str(r#"{"category": "abc"}"#).unwrap();

        assert_eq!(absent.category, None);
        assert_eq!(null.category, Some(None));
        assert_eq!(value.category, Some(Some("abc".to_string())));
    }
}
