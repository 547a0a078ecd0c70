//! Request body extractor accepting JSON or URL-encoded forms.

use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Deserializes the body as JSON when `Content-Type` is `application/json`,
/// otherwise as `application/x-www-form-urlencoded`.
///
/// Any rejection (missing fields, malformed body) becomes
/// [`AppError::InvalidUrl`], never a 5xx.
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

impl<T, S> FromRequest<S> for JsonOrForm<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(payload) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_url(e.body_text()))?;
            Ok(Self(payload))
        } else {
            let Form(payload) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::invalid_url(e.body_text()))?;
            Ok(Self(payload))
        }
    }
}
