//! Short token generation strategies.
//!
//! A [`TokenGenerator`] only proposes candidates. Uniqueness is enforced by the
//! store on insert and collisions are retried by
//! [`crate::application::services::TokenAllocator`].
//!
//! | Strategy        | Candidate                                   |
//! |-----------------|---------------------------------------------|
//! | `sequential`    | Next value of the store-owned counter       |
//! | `random_int`    | Uniform integer in `[0, max)`               |
//! | `random_string` | Fixed-length ASCII alphanumeric string      |

mod random;
mod sequential;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;

pub use random::{RandomIntegerGenerator, RandomStringGenerator};
pub use sequential::SequentialGenerator;

/// Produces candidate short tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenGenerator: Send + Sync {
    /// Returns a fresh, non-empty candidate token.
    ///
    /// # Errors
    ///
    /// Only store-backed strategies fail, with [`StoreError::Unavailable`].
    async fn generate(&self) -> Result<String, StoreError>;
}

/// Selectable generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStrategy {
    Sequential,
    RandomInteger,
    RandomString,
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, thiserror::Error)]
#[error("unknown token strategy '{0}' (expected sequential, random_int or random_string)")]
pub struct UnknownStrategy(String);

impl FromStr for TokenStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "counter" => Ok(Self::Sequential),
            "random_int" | "random_integer" => Ok(Self::RandomInteger),
            "random_string" | "random" => Ok(Self::RandomString),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for TokenStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sequential => "sequential",
            Self::RandomInteger => "random_int",
            Self::RandomString => "random_string",
        };
        f.write_str(name)
    }
}

/// Parameters for building a generator.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorSettings {
    pub strategy: TokenStrategy,
    pub length: usize,
    pub random_max: u64,
}

/// Builds the generator selected by `settings`.
///
/// The sequential strategy draws from `repository`'s counter.
pub fn build_generator(
    settings: GeneratorSettings,
    repository: Arc<dyn MappingRepository>,
) -> Arc<dyn TokenGenerator> {
    match settings.strategy {
        TokenStrategy::Sequential => Arc::new(SequentialGenerator::new(repository)),
        TokenStrategy::RandomInteger => Arc::new(RandomIntegerGenerator::new(settings.random_max)),
        TokenStrategy::RandomString => Arc::new(RandomStringGenerator::new(settings.length)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::InMemoryMappingRepository;

    #[test]
    fn test_parse_strategies() {
        assert_eq!(
            "sequential".parse::<TokenStrategy>().unwrap(),
            TokenStrategy::Sequential
        );
        assert_eq!(
            "RANDOM_INT".parse::<TokenStrategy>().unwrap(),
            TokenStrategy::RandomInteger
        );
        assert_eq!(
            " random_string ".parse::<TokenStrategy>().unwrap(),
            TokenStrategy::RandomString
        );
        assert!("uuid".parse::<TokenStrategy>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for strategy in [
            TokenStrategy::Sequential,
            TokenStrategy::RandomInteger,
            TokenStrategy::RandomString,
        ] {
            assert_eq!(strategy.to_string().parse::<TokenStrategy>().unwrap(), strategy);
        }
    }

    #[tokio::test]
    async fn test_build_generator_uses_selected_strategy() {
        let repository: Arc<dyn MappingRepository> = Arc::new(InMemoryMappingRepository::new());

        let sequential = build_generator(
            GeneratorSettings {
                strategy: TokenStrategy::Sequential,
                length: 7,
                random_max: 10_000,
            },
            repository.clone(),
        );
        assert_eq!(sequential.generate().await.unwrap(), "1");

        let random = build_generator(
            GeneratorSettings {
                strategy: TokenStrategy::RandomString,
                length: 8,
                random_max: 10_000,
            },
            repository,
        );
        assert_eq!(random.generate().await.unwrap().len(), 8);
    }
}
