//! Process-local implementation of the mapping repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;

#[derive(Default)]
struct Inner {
    by_token: HashMap<String, UrlMapping>,
    token_by_url: HashMap<String, String>,
    sequence: i64,
}

/// In-memory mapping store.
///
/// Both indexes and the counter sit behind one lock, so the uniqueness checks
/// and the insert happen atomically. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryMappingRepository {
    inner: RwLock<Inner>,
}

impl InMemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MappingRepository for InMemoryMappingRepository {
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let inner = self.inner.read().await;

        Ok(inner
            .token_by_url
            .get(url)
            .and_then(|token| inner.by_token.get(token))
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<UrlMapping>, StoreError> {
        Ok(self.inner.read().await.by_token.get(token).cloned())
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        let mut inner = self.inner.write().await;

        if inner.by_token.contains_key(&new_mapping.short_token) {
            return Err(StoreError::DuplicateToken(new_mapping.short_token));
        }
        if inner.token_by_url.contains_key(&new_mapping.original_url) {
            return Err(StoreError::DuplicateUrl(new_mapping.original_url));
        }

        let mapping = new_mapping.into_mapping(Utc::now());
        inner
            .token_by_url
            .insert(mapping.original_url.clone(), mapping.short_token.clone());
        inner
            .by_token
            .insert(mapping.short_token.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.inner.read().await.by_token.len() as i64)
    }

    async fn next_sequence(&self) -> Result<i64, StoreError> {
        let mut inner = self.inner.write().await;
        inner.sequence += 1;
        Ok(inner.sequence)
    }
}
