//! Habit model.

use habitry_core::achievements::HabitFacts;
use habitry_core::completion::{CompletionEntry, CompletionState};
use habitry_core::habits::{validate_description, validate_title};
use habitry_core::serde_helpers::deserialize_some;
use habitry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::category::Category;

/// A row from the `habits` table.
#[derive(Debug, Clone, FromRow)]
pub struct Habit {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Unenforced reference; may point at a deleted category.
    pub category_id: Option<DbId>,
    pub completed: bool,
    pub streak: i32,
    /// Longest streak ever reached.
    pub best_streak: i32,
    pub completion_history: Json<Vec<CompletionEntry>>,
    pub created_at: Timestamp,
}

impl Habit {
    pub fn completion_state(&self) -> CompletionState {
        CompletionState {
            completed: self.completed,
            streak: self.streak,
            best_streak: self.best_streak,
            history: self.completion_history.0.clone(),
        }
    }

    pub fn set_completion_state(&mut self, state: CompletionState) {
        self.completed = state.completed;
        self.streak = state.streak;
        self.best_streak = state.best_streak;
        self.completion_history = Json(state.history);
    }

    pub fn facts(&self) -> HabitFacts<'_> {
        HabitFacts {
            category_id: self.category_id,
            completed: self.completed,
            streak: self.streak,
            best_streak: self.best_streak,
            history: &self.completion_history.0,
            created_at: self.created_at,
        }
    }
}

/// Wire representation of a habit with its category resolved.
///
/// `category` is `null` both when the habit has no category and when the
/// referenced category no longer exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitResponse {
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

impl HabitResponse {
    pub fn new(habit: Habit, category: Option<Category>) -> Self {
        Self {
            id: habit.id,
            title: habit.title,
            description: habit.description,
            category,
            completed: habit.completed,
            streak: habit.streak,
            best_streak: habit.best_streak,
            completion_history: habit.completion_history.0,
            created_at: habit.created_at,
        }
    }
}

/// Request body for `POST /habits`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabit {
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    #[validate(custom(function = "validate_description"))]
    pub description: Option<String>,
    /// Raw category id; parsed by the handler so a malformed id is a 400.
    pub category: Option<String>,
}

/// Request body for `PATCH /habits/{id}`.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateHabit {
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,
    #[validate(custom(function = "validate_description"))]
    pub description: Option<String>,
    /// Absent leaves the category alone, `null` clears it.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub category: Option<Option<String>>,
    pub completed: Option<bool>,
}

/// Sanitised insert values.
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub title: String,
    pub description: String,
    pub category_id: Option<DbId>,
}

/// Query parameters for `GET /habits`.
#[derive(Debug, Default, Deserialize)]
pub struct HabitListParams {
    pub category: Option<String>,
}
