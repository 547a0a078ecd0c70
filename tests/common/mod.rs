#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

use shorturl::application::services::UrlValidator;
use shorturl::application::token::{
    RandomStringGenerator, SequentialGenerator, TokenGenerator,
};
use shorturl::domain::entities::{NewMapping, UrlMapping};
use shorturl::domain::repositories::MappingRepository;
use shorturl::error::StoreError;
use shorturl::infrastructure::cache::NullCache;
use shorturl::infrastructure::persistence::InMemoryMappingRepository;
use shorturl::state::AppState;

pub const MAX_ATTEMPTS: u32 = 5;

/// Generator replaying a fixed list of candidates, then repeating the last one.
pub struct ScriptedGenerator {
    candidates: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl ScriptedGenerator {
    pub fn new(candidates: &[&str]) -> Self {
        Self {
            candidates: Mutex::new(candidates.iter().map(|c| c.to_string()).collect()),
            last: Mutex::new(candidates.last().map(|c| c.to_string()).unwrap_or_default()),
        }
    }
}

#[async_trait]
impl TokenGenerator for ScriptedGenerator {
    async fn generate(&self) -> Result<String, StoreError> {
        let next = self.candidates.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| self.last.lock().unwrap().clone()))
    }
}

pub fn memory_repository() -> Arc<InMemoryMappingRepository> {
    Arc::new(InMemoryMappingRepository::new())
}

pub fn state_with(
    repository: Arc<InMemoryMappingRepository>,
    generator: Arc<dyn TokenGenerator>,
) -> AppState {
    AppState::new(
        repository,
        generator,
        Arc::new(NullCache::new()),
        UrlValidator::new(false),
        MAX_ATTEMPTS,
    )
}

/// In-memory state with 7-character random tokens.
pub fn create_test_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = memory_repository();
    let state = state_with(repository.clone(), Arc::new(RandomStringGenerator::new(7)));
    (state, repository)
}

/// In-memory state with counter tokens.
pub fn create_sequential_state() -> (AppState, Arc<InMemoryMappingRepository>) {
    let repository = memory_repository();
    let as_dyn: Arc<dyn MappingRepository> = repository.clone();
    let state = state_with(repository.clone(), Arc::new(SequentialGenerator::new(as_dyn)));
    (state, repository)
}

/// Store whose every operation fails, as an unreachable database would.
pub struct UnavailableRepository;

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl MappingRepository for UnavailableRepository {
    async fn find_by_original_url(&self, _url: &str) -> Result<Option<UrlMapping>, StoreError> {
        Err(unavailable())
    }

    async fn find_by_token(&self, _token: &str) -> Result<Option<UrlMapping>, StoreError> {
        Err(unavailable())
    }

    async fn insert(&self, _new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        Err(unavailable())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Err(unavailable())
    }

    async fn next_sequence(&self) -> Result<i64, StoreError> {
        Err(unavailable())
    }
}

/// State backed by [`UnavailableRepository`].
pub fn create_unavailable_state() -> AppState {
    AppState::new(
        Arc::new(UnavailableRepository),
        Arc::new(RandomStringGenerator::new(7)),
        Arc::new(NullCache::new()),
        UrlValidator::new(false),
        MAX_ATTEMPTS,
    )
}

/// In-memory store that holds the first `callers` URL lookups at a barrier,
/// so every caller sees the URL as unmapped before any of them inserts.
pub struct RacingRepository {
    inner: InMemoryMappingRepository,
    gate: Barrier,
    callers: usize,
    lookups: AtomicUsize,
    url_conflicts: AtomicUsize,
}

impl RacingRepository {
    pub fn new(callers: usize) -> Self {
        Self {
            inner: InMemoryMappingRepository::new(),
            gate: Barrier::new(callers),
            callers,
            lookups: AtomicUsize::new(0),
            url_conflicts: AtomicUsize::new(0),
        }
    }

    /// Inserts rejected with `DuplicateUrl` so far.
    pub fn url_conflicts(&self) -> usize {
        self.url_conflicts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MappingRepository for RacingRepository {
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let found = self.inner.find_by_original_url(url).await?;
        if self.lookups.fetch_add(1, Ordering::SeqCst) < self.callers {
            self.gate.wait().await;
        }
        Ok(found)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<UrlMapping>, StoreError> {
        self.inner.find_by_token(token).await
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        let result = self.inner.insert(new_mapping).await;
        if matches!(result, Err(StoreError::DuplicateUrl(_))) {
            self.url_conflicts.fetch_add(1, Ordering::SeqCst);
        }
        result
    }

    async fn count(&self) -> Result<i64, StoreError> {
        self.inner.count().await
    }

    async fn next_sequence(&self) -> Result<i64, StoreError> {
        self.inner.next_sequence().await
    }
}
