pub mod forms;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /forms/ambassador     ambassador application (multipart, optional CV)
/// /forms/consultation   consultation request (JSON)
/// /forms/ielts          IELTS class registration (JSON)
/// /forms/subscribe      newsletter signup (JSON)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/forms", forms::router())
}
