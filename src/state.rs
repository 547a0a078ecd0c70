//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{Resolver, TokenAllocator, UrlValidator};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::CacheService;

#[derive(Clone)]
pub struct AppState {
    pub allocator: Arc<TokenAllocator>,
    pub resolver: Arc<Resolver>,
    pub validator: Arc<UrlValidator>,
    pub repository: Arc<dyn MappingRepository>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    /// Assembles services around a store, a token generator and a cache.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        generator: Arc<dyn crate::application::token::TokenGenerator>,
        cache: Arc<dyn CacheService>,
        validator: UrlValidator,
        max_attempts: u32,
    ) -> Self {
        let allocator = TokenAllocator::new(repository.clone(), generator, max_attempts);
        let resolver = Resolver::new(repository.clone(), cache.clone());

        Self {
            allocator: Arc::new(allocator),
            resolver: Arc::new(resolver),
            validator: Arc::new(validator),
            repository,
            cache,
        }
    }
}
