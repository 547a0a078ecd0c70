//! API route configuration.

use crate::api::handlers::{redirect_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Short URL endpoints, nested under `/api`.
///
/// - `POST /shorturl`         - Allocate a token for a URL
/// - `GET  /shorturl/{token}` - Redirect to the original URL
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorturl", post(shorten_handler))
        .route("/shorturl/{token}", get(redirect_handler))
}
