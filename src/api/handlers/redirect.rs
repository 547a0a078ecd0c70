//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a token to its original URL.
///
/// # Endpoint
///
/// `GET /api/shorturl/{token}`
///
/// Responds `302 Found` with the original URL in `Location`.
///
/// # Errors
///
/// Returns 404 Not Found if the token is unknown.
/// Returns 500 on storage failure.
pub async fn redirect_handler(
    Path(token): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.resolver.resolve(&token).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
