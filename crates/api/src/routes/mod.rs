pub mod categories;
pub mod habits;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /habits                  list (?category), create
/// /habits/{id}             get, update (PATCH), delete
///
/// /categories              list, create
/// /categories/{id}         get, update (PATCH), delete
///
/// /insights                progress statistics and achievements
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/habits", habits::router())
        .nest("/categories", categories::router())
        .route("/insights", get(handlers::insights::get_insights))
}
