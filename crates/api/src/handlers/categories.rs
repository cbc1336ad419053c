//! Handlers for `/categories`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use habitry_core::categories::{normalize_name, resolve_color};
use habitry_core::error::CoreError;
use habitry_core::ids::parse_id;
use habitry_core::types::DbId;
use habitry_db::models::category::{Category, CreateCategory, NewCategory, UpdateCategory};
use habitry_db::repositories::CategoryRepo;
use habitry_db::DbPool;

use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "Category";

async fn find_category(pool: &DbPool, id: DbId) -> AppResult<Category> {
    let category = CategoryRepo::find_by_id(pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;
    Ok(category)
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(ENTITY, &raw_id)?;
    let category = find_category(&state.pool, id).await?;
    Ok(Json(DataResponse { data: category }))
}

/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let new_category = NewCategory {
        name: normalize_name(&input.name).map_err(|msg| CoreError::field("name", msg))?,
        color: resolve_color(input.color.as_deref()),
    };
    let category = CategoryRepo::create(&state.pool, &new_category).await?;

    tracing::info!(
        category_id = %category.id,
        color = %category.color,
        "Category created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PATCH /categories/{id}
///
/// Blank or absent fields keep their current value.
pub async fn update_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(ENTITY, &raw_id)?;
    let mut category = find_category(&state.pool, id).await?;

    if let Some(name) = input.name.as_deref().filter(|n| !n.trim().is_empty()) {
        category.name = normalize_name(name).map_err(|msg| CoreError::field("name", msg))?;
    }
    if let Some(color) = input.color.as_deref().filter(|c| !c.trim().is_empty()) {
        category.color = resolve_color(Some(color));
    }

    let saved = CategoryRepo::save(&state.pool, &category)
        .await?
        .ok_or(CoreError::NotFound { entity: ENTITY, id })?;

    tracing::info!(category_id = %id, "Category updated");
    Ok(Json(DataResponse { data: saved }))
}

/// DELETE /categories/{id}
///
/// Habits referencing the category keep the (now dangling) reference.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(ENTITY, &raw_id)?;
    let deleted = CategoryRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(CoreError::NotFound { entity: ENTITY, id }.into());
    }

    tracing::info!(category_id = %id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
