//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /api/shorturl`         - Allocate a short token
//! - `GET  /api/shorturl/{token}` - Redirect to the original URL
//! - `GET  /health`               - Storage and cache health
//! - `GET  /`                     - Landing page (`views/index.html`)
//! - `/public/*`                  - Static assets
//!
//! Every request is traced; trailing slashes are trimmed before routing.

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Directory holding the landing page.
pub const VIEWS_DIR: &str = "views";

/// Directory served under `/public`.
pub const PUBLIC_DIR: &str = "public";

/// Routes with state applied, without path normalization.
///
/// Used directly by tests; [`app_router`] wraps it for serving.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api::routes::api_routes())
        .route("/health", get(health_handler))
        .route_service("/", ServeFile::new(format!("{VIEWS_DIR}/index.html")))
        .nest_service("/public", ServeDir::new(PUBLIC_DIR))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service with trailing-slash normalization.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
