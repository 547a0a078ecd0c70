//! Random token strategies.

use async_trait::async_trait;
use rand::Rng;
use rand::distr::Alphanumeric;

use super::TokenGenerator;
use crate::error::StoreError;

/// Generates fixed-length ASCII alphanumeric tokens.
#[derive(Debug, Clone)]
pub struct RandomStringGenerator {
    length: usize,
}

impl RandomStringGenerator {
    /// Creates a generator producing tokens of `length` characters (at least 1).
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    fn next_token(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl TokenGenerator for RandomStringGenerator {
    async fn generate(&self) -> Result<String, StoreError> {
        Ok(self.next_token())
    }
}

/// Generates decimal tokens drawn uniformly from `[0, max)`.
///
/// Small ranges collide often; the allocator's retry cap bounds the cost.
#[derive(Debug, Clone)]
pub struct RandomIntegerGenerator {
    max: u64,
}

impl RandomIntegerGenerator {
    /// Creates a generator over `[0, max)` (`max` of at least 1).
    pub fn new(max: u64) -> Self {
        Self { max: max.max(1) }
    }
}

#[async_trait]
impl TokenGenerator for RandomIntegerGenerator {
    async fn generate(&self) -> Result<String, StoreError> {
        let value = rand::rng().random_range(0..self.max);
        Ok(value.to_string())
    }
}
