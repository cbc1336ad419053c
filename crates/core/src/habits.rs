//! Habit input rules.

use validator::ValidationError;

/// Maximum length of a habit title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a habit description in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 2_000;

/// Normalise a title: trim, and reject it if nothing remains.
pub fn normalize_title(title: &str) -> Result<String, String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Title is required".to_string());
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(trimmed.to_string())
}

/// Normalise a description. Absent descriptions become empty.
pub fn normalize_description(description: Option<&str>) -> String {
    description.map(str::trim).unwrap_or_default().to_string()
}

/// `validator` hook for title fields.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    normalize_title(title)
        .map(|_| ())
        .map_err(|msg| ValidationError::new("title").with_message(msg.into()))
}

/// `validator` hook for description fields.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::new("description").with_message(
            format!("Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters")
                .into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(normalize_title("  Drink water \n").unwrap(), "Drink water");
    }

    #[test]
    fn empty_title_rejected() {
        assert_eq!(normalize_title("").unwrap_err(), "Title is required");
    }

    #[test]
    fn whitespace_title_rejected() {
        assert!(normalize_title(" \t\n ").is_err());
    }

    #[test]
    fn overlong_title_rejected() {
        let title = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(normalize_title(&title)
            .unwrap_err()
            .contains("maximum length"));
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let title = "é".repeat(MAX_TITLE_LENGTH);
        assert!(normalize_title(&title).is_ok());
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        assert_eq!(normalize_description(None), "");
        assert_eq!(normalize_description(Some("  read ")), "read");
    }

    #[test]
    fn overlong_description_rejected() {
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_LENGTH)).is_ok());
        assert!(validate_description(&"d".repeat(MAX_DESCRIPTION_LENGTH + 1)).is_err());
    }

    #[test]
    fn validator_hook_carries_message() {
        let err = validate_title("   ").unwrap_err();
        assert_eq!(err.message.as_deref(), Some("Title is required"));
    }
}
