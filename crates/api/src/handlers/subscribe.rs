//! Newsletter subscription endpoint (JSON).

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use edulead_core::forms::{FormKind, SubscriberForm};
use edulead_core::stamp::submission_timestamp;
use edulead_core::wizard::StepForm;
use edulead_sheets::record_submission;

use crate::error::AppResult;
use crate::extract::FormJson;
use crate::notifications::{self, SubmissionNotice};
use crate::response::SubmitResponse;
use crate::state::AppState;

/// POST /api/v1/forms/subscribe
pub async fn submit_subscriber(
    State(state): State<AppState>,
    FormJson(form): FormJson<SubscriberForm>,
) -> AppResult<Json<SubmitResponse>> {
    form.validate()?;

    let stamp = submission_timestamp(Utc::now());
    let row = form.to_row(&stamp);
    let schema = FormKind::Subscriber.schema();
    record_submission(state.store.as_ref(), schema, &row).await?;

    tracing::info!(form = FormKind::Subscriber.label(), email = %form.email, "Subscriber recorded");

    let notice = SubmissionNotice::from_row(FormKind::Subscriber, &row);
    notifications::dispatch(&state, notice);

    Ok(Json(SubmitResponse::with_message("Thanks for subscribing!")))
}
