//! Handler for the shorten endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::api::extract::JsonOrForm;
use crate::error::AppError;
use crate::state::AppState;

/// Allocates (or returns the existing) short token for a URL.
///
/// # Endpoint
///
/// `POST /api/shorturl`
///
/// # Request Body
///
/// JSON `{"url": "https://example.com"}` or form `url=https%3A%2F%2Fexample.com`.
///
/// # Response
///
/// ```json
/// { "original_url": "https://example.com", "short_url": "aZ3kP9q" }
/// ```
///
/// Re-submitting the same URL returns the same `short_url`.
///
/// # Errors
///
/// Returns 400 with `{"error": "invalid url"}` if the input is not an absolute
/// HTTP(S) URL. Returns 500 on storage failure.
pub async fn shorten_handler(
    State(state): State<AppState>,
    JsonOrForm(payload): JsonOrForm<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    state.validator.validate(&payload.url).await?;

    let token = state.allocator.allocate(&payload.url).await?;

    Ok(Json(ShortenResponse {
        original_url: payload.url,
        short_url: token,
    }))
}
