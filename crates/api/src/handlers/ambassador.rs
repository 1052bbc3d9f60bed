//! Ambassador application endpoint (multipart, optional CV upload).

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use edulead_core::attachment::{validate_cv, CvFile};
use edulead_core::forms::{AmbassadorForm, FormKind};
use edulead_core::stamp::submission_timestamp;
use edulead_core::wizard::StepForm;
use edulead_sheets::record_submission;

use crate::error::{AppError, AppResult};
use crate::extract::FormMultipart;
use crate::notifications::{self, SubmissionNotice};
use crate::response::SubmitResponse;
use crate::state::AppState;

/// POST /api/v1/forms/ambassador
///
/// Accepts the application as `multipart/form-data`: the text fields
/// mirror the JSON payload names, plus an optional `cv` file part.
/// Field checks run first, then the CV's type and size, so an invalid
/// field is reported even when the file is also bad.
pub async fn submit_ambassador(
    State(state): State<AppState>,
    FormMultipart(mut multipart): FormMultipart,
) -> AppResult<Json<SubmitResponse>> {
    let mut form = AmbassadorForm::default();
    let mut cv: Option<CvFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        if name == "cv" {
            let filename = field.file_name().unwrap_or("cv").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            // A file input submitted without a selection arrives as an
            // empty part.
            if bytes.is_empty() {
                continue;
            }
            cv = Some(CvFile {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            apply_text_field(&mut form, &name, value);
        }
    }

    form.validate()?;
    if let Some(cv) = &cv {
        validate_cv(cv)?;
    }

    let stamp = submission_timestamp(Utc::now());
    let row = form.to_row(&stamp, cv.is_some());
    let schema = FormKind::Ambassador.schema();
    record_submission(state.store.as_ref(), schema, &row).await?;

    tracing::info!(
        form = FormKind::Ambassador.label(),
        email = %form.email,
        has_cv = cv.is_some(),
        "Lead recorded"
    );

    let notice = SubmissionNotice::from_row(FormKind::Ambassador, &row).with_cv(cv);
    notifications::dispatch(&state, notice);

    Ok(Json(SubmitResponse::ok()))
}

fn apply_text_field(form: &mut AmbassadorForm, name: &str, value: String) {
    match name {
        "fullName" => form.full_name = value,
        "email" => form.email = value,
        "phone" => form.phone = value,
        "languages" => form.languages = value,
        "postalCode" => form.postal_code = value,
        "currentStudy" => form.current_study = value,
        "destination" => form.destination = value,
        "motivation" => form.motivation = value,
        "socialLink" => form.social_link = value,
        "consent" => form.consent = matches!(value.as_str(), "true" | "on" | "1"),
        _ => tracing::debug!(field = name, "Ignoring unknown multipart field"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_fields_map_onto_the_payload() {
        let mut form = AmbassadorForm::default();
        apply_text_field(&mut form, "fullName", "Aye Aye".to_string());
        apply_text_field(&mut form, "postalCode", "YGN-11".to_string());
        apply_text_field(&mut form, "consent", "on".to_string());
        assert_eq!(form.full_name, "Aye Aye");
        assert_eq!(form.postal_code, "YGN-11");
        assert!(form.consent);
    }

    #[test]
    fn consent_accepts_checkbox_spellings() {
        for spelling in ["true", "on", "1"] {
            let mut form = AmbassadorForm::default();
            apply_text_field(&mut form, "consent", spelling.to_string());
            assert!(form.consent, "{spelling} should read as consent");
        }
        let mut form = AmbassadorForm::default();
        apply_text_field(&mut form, "consent", "false".to_string());
        assert!(!form.consent);
    }
}
