//! Idempotent short token allocation.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::application::token::TokenGenerator;
use crate::domain::entities::NewMapping;
use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, StoreError};

/// Default number of insert attempts before allocation gives up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Assigns short tokens to original URLs.
///
/// # Guarantees
///
/// - **Idempotence**: an already-mapped URL returns its existing token without a write.
/// - **Uniqueness**: a token is only returned after the store accepted it, so a
///   colliding candidate is never reported as success.
/// - **Concurrency**: when two callers race on the same new URL, the store's
///   uniqueness on `original_url` rejects the loser, which then returns the
///   winner's token.
pub struct TokenAllocator {
    repository: Arc<dyn MappingRepository>,
    generator: Arc<dyn TokenGenerator>,
    max_attempts: u32,
}

impl TokenAllocator {
    /// Creates an allocator. `max_attempts` is clamped to at least 1.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        generator: Arc<dyn TokenGenerator>,
        max_attempts: u32,
    ) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns the token for `original_url`, creating a mapping on first use.
    ///
    /// `original_url` must already be validated; it is compared and stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store fails or every attempt collided.
    pub async fn allocate(&self, original_url: &str) -> Result<String, AppError> {
        if let Some(existing) = self.repository.find_by_original_url(original_url).await? {
            debug!(token = %existing.short_token, "URL already mapped");
            return Ok(existing.short_token);
        }

        for attempt in 1..=self.max_attempts {
            let candidate = self.generator.generate().await?;

            match self
                .repository
                .insert(NewMapping::new(original_url, candidate))
                .await
            {
                Ok(mapping) => {
                    info!(token = %mapping.short_token, attempt, "Allocated short token");
                    return Ok(mapping.short_token);
                }
                Err(StoreError::DuplicateToken(token)) => {
                    warn!(%token, attempt, max_attempts = self.max_attempts, "Token collision, retrying");
                }
                Err(StoreError::DuplicateUrl(_)) => {
                    return self.existing_after_conflict(original_url).await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(AppError::storage(
            "Failed to allocate a unique token",
            json!({ "attempts": self.max_attempts }),
        ))
    }

    /// Re-reads the mapping another caller inserted for the same URL.
    ///
    /// The Postgres store enforces URL uniqueness through `md5(original_url)`.
    /// Two distinct URLs with colliding digests would report `DuplicateUrl`
    /// here, find nothing on re-read and surface as a storage error.
    async fn existing_after_conflict(&self, original_url: &str) -> Result<String, AppError> {
        debug!("Concurrent allocation for the same URL, returning the stored token");

        self.repository
            .find_by_original_url(original_url)
            .await?
            .map(|mapping| mapping.short_token)
            .ok_or_else(|| {
                AppError::storage(
                    "Mapping reported as duplicate but not found",
                    json!({ "original_url": original_url }),
                )
            })
    }
}
