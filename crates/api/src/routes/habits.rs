//! Route definitions for habits.
//!
//! Mounted at `/habits` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::habits;
use crate::state::AppState;

/// ```text
/// GET    /                   -> list_habits (?category)
/// POST   /                   -> create_habit
/// GET    /{id}               -> get_habit
/// PATCH  /{id}               -> update_habit
/// DELETE /{id}               -> delete_habit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(habits::list_habits).post(habits::create_habit))
        .route(
            "/{id}",
            get(habits::get_habit)
                .patch(habits::update_habit)
                .delete(habits::delete_habit),
        )
}
