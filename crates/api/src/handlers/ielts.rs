//! IELTS class registration endpoint (JSON).

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use edulead_core::forms::{FormKind, IeltsForm};
use edulead_core::stamp::submission_timestamp;
use edulead_core::wizard::StepForm;
use edulead_sheets::record_submission;

use crate::error::AppResult;
use crate::extract::FormJson;
use crate::notifications::{self, SubmissionNotice};
use crate::response::SubmitResponse;
use crate::state::AppState;

/// POST /api/v1/forms/ielts
pub async fn submit_ielts(
    State(state): State<AppState>,
    FormJson(form): FormJson<IeltsForm>,
) -> AppResult<Json<SubmitResponse>> {
    form.validate()?;

    let stamp = submission_timestamp(Utc::now());
    let row = form.to_row(&stamp);
    let schema = FormKind::Ielts.schema();
    record_submission(state.store.as_ref(), schema, &row).await?;

    tracing::info!(
        form = FormKind::Ielts.label(),
        email = %form.email,
        class_type = %form.class_type,
        "Lead recorded"
    );

    let notice = SubmissionNotice::from_row(FormKind::Ielts, &row);
    notifications::dispatch(&state, notice);

    Ok(Json(SubmitResponse::ok()))
}
