use validator::ValidationErrors;

use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Invalid {entity} ID format: {value}")]
    InvalidId { entity: &'static str, value: String },

    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        /// Per-field messages, e.g. `"title: Title is required"`.
        details: Vec<String>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// A validation failure with a single message and no field details.
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// A validation failure attributed to one field.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        CoreError::Validation {
            details: vec![format!("{field}: {message}")],
            message,
        }
    }
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    (field.to_string(), message)
                })
            })
            .collect();
        fields.sort();

        let message = match fields.as_slice() {
            [(_, only)] => only.clone(),
            _ => "Request body failed validation".to_string(),
        };
        let details = fields
            .into_iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();

        CoreError::Validation { message, details }
    }
}
