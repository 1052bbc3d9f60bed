//! Shared response envelope for the submission endpoints.
//!
//! Success responses use a `{ "success": true }` envelope matching the
//! error side produced by `AppError`. Use [`SubmitResponse`] instead of
//! ad-hoc `serde_json::json!({ "success": true })` to get compile-time
//! type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "success": true, "message": ... }` response body.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmitResponse {
    /// A bare success acknowledgment.
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Success with a short human-readable confirmation line.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }
}
