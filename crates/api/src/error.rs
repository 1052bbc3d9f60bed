use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use edulead_core::error::CoreError;
use edulead_sheets::SheetsError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for validation failures and [`SheetsError`] for
/// persistence failures, plus HTTP-specific variants. Implements
/// [`IntoResponse`] to produce the `{ "success": false, "error": ... }`
/// body the form clients expect.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `edulead_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The spreadsheet backend failed.
    #[error("Sheets error: {0}")]
    Sheets(#[from] SheetsError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Body text for failures the submitter cannot do anything about.
const GENERIC_FAILURE: &str = "Something went wrong recording your submission. Please try again.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- Validation failures: surface the rule verbatim ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
                }
            },

            // --- Persistence failures: log detail, return a generic body ---
            AppError::Sheets(err) => {
                tracing::error!(error = %err, "Spreadsheet write failed");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_string())
            }
        };

        let body = json!({
            "success": false,
            "error": message,
        });

        (status, axum::Json(body)).into_response()
    }
}
