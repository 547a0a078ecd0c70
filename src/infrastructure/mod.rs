//! Infrastructure layer for external integrations.
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - Mapping store implementations

pub mod cache;
pub mod persistence;
