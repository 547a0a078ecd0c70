//! Counter-backed token strategy.

use std::sync::Arc;

use async_trait::async_trait;

use super::TokenGenerator;
use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;

/// Renders the store's atomic counter as a decimal token.
///
/// The counter lives in the store, so concurrent allocators never observe the
/// same value.
pub struct SequentialGenerator {
    repository: Arc<dyn MappingRepository>,
}

impl SequentialGenerator {
    pub fn new(repository: Arc<dyn MappingRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl TokenGenerator for SequentialGenerator {
    async fn generate(&self) -> Result<String, StoreError> {
        let value = self.repository.next_sequence().await?;
        Ok(value.to_string())
    }
}
