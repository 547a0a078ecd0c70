//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::TokenAllocator`] - Idempotent token allocation with collision retry
//! - [`services::Resolver`] - Token lookup with read-through cache
//! - [`services::UrlValidator`] - Boundary URL validation
//! - [`token`] - Token generation strategies

pub mod services;
pub mod token;
