//! Handlers for `/habits`.
//!
//! Every response carries the habit's category resolved to its full
//! representation. Updates follow load, patch fields, save: the record is
//! read, the request's fields and any completion toggle are applied in
//! memory, and everything is written back in one UPDATE.

use std::collections::{HashMap, HashSet};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use habitry_core::completion::{apply_completion, CompletionChange};
use habitry_core::error::CoreError;
use habitry_core::habits::{normalize_description, normalize_title};
use habitry_core::ids::parse_id;
use habitry_core::types::DbId;
use habitry_db::models::category::Category;
use habitry_db::models::habit::{
    CreateHabit, Habit, HabitListParams, HabitResponse, NewHabit, UpdateHabit,
};
use habitry_db::repositories::{CategoryRepo, HabitRepo};
use habitry_db::DbPool;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Habit";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an optional category reference. Blank strings mean "no category".
fn parse_category_ref(raw: Option<&str>) -> Result<Option<DbId>, CoreError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => parse_id("Category", raw).map(Some),
        None => Ok(None),
    }
}

async fn find_habit(pool: &DbPool, id: DbId) -> AppResult<Habit> {
    let habit = HabitRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
    Ok(habit)
}

/// Resolve the category of a single habit. A dangling reference resolves
/// to `None`.
async fn with_category(pool: &DbPool, habit: Habit) -> AppResult<HabitResponse> {
    let category = match habit.category_id {
        Some(category_id) => CategoryRepo::find_by_id(pool, category_id).await?,
        None => None,
    };
    Ok(HabitResponse::new(habit, category))
}

/// Resolve categories for a batch of habits with a single lookup.
async fn with_categories(pool: &DbPool, habits: Vec<Habit>) -> AppResult<Vec<HabitResponse>> {
    let ids: Vec<DbId> = habits
        .iter()
        .filter_map(|h| h.category_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let categories: HashMap<DbId, Category> = CategoryRepo::find_by_ids(pool, &ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(habits
        .into_iter()
        .map(|habit| {
            let category = habit
                .category_id
                .and_then(|id| categories.get(&id).cloned());
            HabitResponse::new(habit, category)
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /habits?category=
///
/// List all habits, optionally only those referencing one category.
pub async fn list_habits(
    State(state): State<AppState>,
    Query(params): Query<HabitListParams>,
) -> AppResult<impl IntoResponse> {
    let habits = match parse_category_ref(params.category.as_deref())? {
        Some(category_id) => HabitRepo::list_by_category(&state.pool, category_id).await?,
        None => HabitRepo::list(&state.pool).await?,
    };

    let data = with_categories(&state.pool, habits).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /habits/{id}
pub async fn get_habit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(ENTITY, &raw_id)?;
    let habit = find_habit(&state.pool, id).await?;

    let data = with_category(&state.pool, habit).await?;
    Ok(Json(DataResponse { data }))
}

/// POST /habits
pub async fn create_habit(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateHabit>,
) -> AppResult<impl IntoResponse> {
    let title = normalize_title(&input.title).map_err(|msg| CoreError::field("title", msg))?;
    let category_id = parse_category_ref(input.category.as_deref())?;

    let new_habit = NewHabit {
        title,
        description: normalize_description(input.description.as_deref()),
        category_id,
    };
    let habit = HabitRepo::create(&state.pool, &new_habit).await?;

    tracing::info!(
        habit_id = %habit.id,
        category_id = ?habit.category_id,
        "Habit created"
    );

    let data = with_category(&state.pool, habit).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data })))
}

/// PATCH /habits/{id}
///
/// Partial update. `completed` runs the completion toggle: `true` bumps
/// the streak and appends to the history, `false` resets the streak.
pub async fn update_habit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateHabit>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(ENTITY, &raw_id)?;
    let mut habit = find_habit(&state.pool, id).await?;

    if let Some(ref title) = input.title {
        habit.title = normalize_title(title).map_err(|msg| CoreError::field("title", msg))?;
    }
    if let Some(ref description) = input.description {
        habit.description = normalize_description(Some(description));
    }
    if let Some(ref category) = input.category {
        habit.category_id = parse_category_ref(category.as_deref())?;
    }

    let mut change = None;
    if let Some(completed) = input.completed {
        let (next, applied) = apply_completion(&habit.completion_state(), completed, Utc::now());
        if applied == CompletionChange::RepeatedCompletion {
            tracing::warn!(
                habit_id = %id,
                streak = next.streak,
                "Habit marked completed while already completed; streak incremented again"
            );
        }
        habit.set_completion_state(next);
        change = Some(applied);
    }

    let saved = HabitRepo::save(&state.pool, &habit)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

    match change {
        Some(change) => tracing::info!(
            habit_id = %id,
            change = change.as_str(),
            streak = saved.streak,
            history_len = saved.completion_history.0.len(),
            "Habit completion toggled"
        ),
        None => tracing::info!(habit_id = %id, "Habit updated"),
    }

    let data = with_category(&state.pool, saved).await?;
    Ok(Json(DataResponse { data }))
}

/// DELETE /habits/{id}
pub async fn delete_habit(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(ENTITY, &raw_id)?;
    let deleted = HabitRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(CoreError::NotFound { entity: ENTITY, id }.into());
    }

    tracing::info!(habit_id = %id, "Habit deleted");
    Ok(StatusCode::NO_CONTENT)
}
