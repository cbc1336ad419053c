//! Parsing of client-supplied identifiers.
//!
//! Identifiers travel as opaque strings. A string that is not a UUID is
//! rejected as malformed (400) before any lookup happens, so a missing
//! record (404) is never confused with a bad id.

use crate::error::CoreError;
use crate::types::DbId;

/// Parse a raw identifier for `entity`, rejecting malformed input.
pub fn parse_id(entity: &'static str, raw: &str) -> Result<DbId, CoreError> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| CoreError::InvalidId {
        entity,
        value: raw.to_string(),
    })
}

/// Generate a fresh, time-ordered identifier.
pub fn new_id() -> DbId {
    uuid::Uuid::now_v7()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hyphenated_uuid() {
        let id = new_id();
        assert_eq!(parse_id("Habit", &id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_mongo_style_object_id() {
        let err = parse_id("Habit", "64b7f0c2e4b0a1a2b3c4d5e6").unwrap_err();
        assert!(matches!(err, CoreError::InvalidId { entity: "Habit", .. }));
    }

    #[test]
    fn rejects_empty_string() {
        assert!(parse_id("Category", "").is_err());
    }

    #[test]
    fn new_ids_are_version_7() {
        assert_eq!(new_id().get_version_num(), 7);
    }
}
