//! DTOs for the shorten endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/shorturl`, as JSON or form fields.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
}

/// Successful shorten response.
///
/// `short_url` carries the token; clients build the redirect path
/// `/api/shorturl/{short_url}` from it.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
}
