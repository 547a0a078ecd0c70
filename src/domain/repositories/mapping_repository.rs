//! Repository trait for URL mapping storage.

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::error::StoreError;
use async_trait::async_trait;

/// Narrow storage contract required by the allocator and resolver.
///
/// Backends must enforce two uniqueness rules and report them distinctly on
/// [`insert`](MappingRepository::insert):
///
/// - `short_token` is unique ([`StoreError::DuplicateToken`])
/// - `original_url` is unique ([`StoreError::DuplicateUrl`])
///
/// Lookups use exact string equality on both sides.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMappingRepository`] - Process-local implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds the mapping whose original URL equals `url` exactly.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on backend failure.
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Finds the mapping for a short token.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] on backend failure.
    async fn find_by_token(&self, token: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Inserts a new mapping.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateToken`] if the token is taken
    /// - [`StoreError::DuplicateUrl`] if the original URL already has a mapping
    /// - [`StoreError::Unavailable`] on backend failure
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError>;

    /// Counts stored mappings.
    async fn count(&self) -> Result<i64, StoreError>;

    /// Atomically advances the store-owned counter and returns the new value.
    ///
    /// The first call on an empty store returns `1`. Values are never reused,
    /// though gaps may appear when an allocation does not complete.
    async fn next_sequence(&self) -> Result<i64, StoreError>;
}
