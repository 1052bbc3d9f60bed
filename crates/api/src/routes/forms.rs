//! Form submission routes.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Request body ceiling for form submissions. The CV attachment alone may be
/// up to 4MB, so leave headroom for the text fields and multipart framing.
const MAX_SUBMISSION_BYTES: usize = 6 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ambassador", post(handlers::ambassador::submit_ambassador))
        .route(
            "/consultation",
            post(handlers::consultation::submit_consultation),
        )
        .route("/ielts", post(handlers::ielts::submit_ielts))
        .route("/subscribe", post(handlers::subscribe::submit_subscriber))
        .layer(DefaultBodyLimit::max(MAX_SUBMISSION_BYTES))
}
