//! REST API layer for HTTP request/response handling.
//!
//! - [`dto`] - Request/response serialization
//! - [`extract`] - JSON-or-form body extractor
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
