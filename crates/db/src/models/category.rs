//! Category model.

use habitry_core::categories::{validate_color, validate_name};
use habitry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
}

/// Request body for `POST /categories`.
///
/// `name` defaults to empty so a missing name is reported as a validation
/// failure rather than a malformed body.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategory {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,
}

/// Request body for `PATCH /categories/{id}`. Absent or blank fields are
/// left unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    pub name: Option<String>,
    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,
}

/// Sanitised insert values.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}
