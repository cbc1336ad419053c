//! Handler for `/insights`: progress statistics and achievements.

use std::collections::HashSet;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;

use habitry_core::achievements::{compute_insights, HabitFacts};
use habitry_core::types::DbId;
use habitry_db::repositories::{CategoryRepo, HabitRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /insights
///
/// References to deleted categories do not count towards "Diversifying".
pub async fn get_insights(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let habits = HabitRepo::list(&state.pool).await?;
    let live: HashSet<DbId> = CategoryRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();

    let facts: Vec<HabitFacts<'_>> = habits
        .iter()
        .map(|h| HabitFacts {
            category_id: h.category_id.filter(|id| live.contains(id)),
            ..h.facts()
        })
        .collect();
    let insights = compute_insights(&facts, Utc::now());

    tracing::debug!(
        total_habits = insights.total_habits,
        highest_streak = insights.highest_streak,
        weekly_completion_rate = insights.weekly_completion_rate,
        "Insights computed"
    );

    Ok(Json(DataResponse { data: insights }))
}
