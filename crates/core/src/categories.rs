//! Category input rules.

use validator::ValidationError;

/// Color assigned when a category is created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "blue";

/// Maximum length of a category name.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 50;

/// Maximum length of a color value (a name like `"blue"` or `"#FF4444FF"`).
pub const MAX_CATEGORY_COLOR_LENGTH: usize = 32;

/// Normalise a category name: trim, and reject it if nothing remains.
pub fn normalize_name(name: &str) -> Result<String, String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Category name is required".to_string());
    }
    if trimmed.chars().count() > MAX_CATEGORY_NAME_LENGTH {
        return Err(format!(
            "Category name exceeds maximum length of {MAX_CATEGORY_NAME_LENGTH} characters"
        ));
    }
    Ok(trimmed.to_string())
}

/// Resolve the color to store. Absent or blank colors fall back to the default.
pub fn resolve_color(color: Option<&str>) -> String {
    match color.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY_COLOR.to_string(),
    }
}

/// `validator` hook for category names.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    normalize_name(name)
        .map(|_| ())
        .map_err(|msg| ValidationError::new("name").with_message(msg.into()))
}

/// `validator` hook for color fields.
pub fn validate_color(color: &str) -> Result<(), ValidationError> {
    if color.trim().chars().count() > MAX_CATEGORY_COLOR_LENGTH {
        return Err(ValidationError::new("color").with_message(
            format!("Color exceeds maximum length of {MAX_CATEGORY_COLOR_LENGTH} characters")
                .into(),
        ));
    }
    Ok(())
}
