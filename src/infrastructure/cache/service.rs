//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of token to original URL.
///
/// Mappings never change once created, so entries need no invalidation; they
/// only expire by TTL. Cache failures must degrade to store lookups.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the original URL cached for a token.
    ///
    /// Returns `Ok(None)` on a miss.
    async fn get_url(&self, token: &str) -> CacheResult<Option<String>>;

    /// Stores a token mapping, using the implementation's default TTL when
    /// `ttl_seconds` is `None`.
    async fn set_url(
        &self,
        token: &str,
        original_url: &str,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Human-readable backend name for health reports.
    fn backend(&self) -> &'static str;
}
