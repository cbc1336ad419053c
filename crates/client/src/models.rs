//! Wire types exchanged with the server.

use habitry_core::completion::CompletionEntry;
use habitry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

/// `{ "data": ... }` success envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
}

/// A habit with its category resolved (`None` when unset or dangling).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub category: Option<Category>,
    pub completed: bool,
    pub streak: i32,
    pub best_streak: i32,
    pub completion_history: Vec<CompletionEntry>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewHabit {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<DbId>,
}

/// Partial habit update. `category: Some(None)` clears the category.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HabitPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<DbId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl HabitPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
