//! Token to original URL resolution.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::repositories::MappingRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Resolves short tokens to their original URLs.
///
/// # Lookup Flow
///
/// 1. Check the cache (cache errors fall through to the store)
/// 2. On a miss, exact-match lookup in the store
/// 3. On a store hit, fill the cache in the background
///
/// Tokens are matched exactly as received; no trimming or case folding.
pub struct Resolver {
    repository: Arc<dyn MappingRepository>,
    cache: Arc<dyn CacheService>,
}

impl Resolver {
    /// Creates a new resolver.
    pub fn new(repository: Arc<dyn MappingRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Returns the original URL mapped to `token`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no mapping exists for the token.
    /// Returns [`AppError::Storage`] if the store is unavailable.
    pub async fn resolve(&self, token: &str) -> Result<String, AppError> {
        match self.cache.get_url(token).await {
            Ok(Some(url)) => {
                debug!("Cache HIT for {}", token);
                return Ok(url);
            }
            Ok(None) => debug!("Cache MISS for {}", token),
            Err(e) => warn!("Cache error: {}", e),
        }

        let mapping = self
            .repository
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found(token))?;

        let cache = self.cache.clone();
        let key = mapping.short_token.clone();
        let url = mapping.original_url.clone();
        tokio::spawn(async move {
            if let Err(e) = cache.set_url(&key, &url, None).await {
                warn!("Failed to cache URL: {}", e);
            }
        });

        Ok(mapping.original_url)
    }
}
