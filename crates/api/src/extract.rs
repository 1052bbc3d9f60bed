//! Body extractors that keep rejections on the wire contract.
//!
//! Axum's stock extractors answer malformed bodies with plain-text
//! rejections. The form clients parse every response as JSON, so these
//! wrappers route rejections through [`AppError::BadRequest`] and the
//! `{ "success": false, "error": ... }` envelope instead.

use axum::extract::{FromRequest, Multipart, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// [`Json`] with its rejection mapped onto [`AppError::BadRequest`].
///
/// ```ignore
/// async fn handler(FormJson(form): FormJson<ConsultationForm>) -> AppResult<...>
/// ```
pub struct FormJson<T>(pub T);

impl<S, T> FromRequest<S> for FormJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// [`Multipart`] with its rejection mapped onto [`AppError::BadRequest`].
pub struct FormMultipart(pub Multipart);

impl<S> FromRequest<S> for FormMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(multipart))
    }
}
