//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;
use crate::utils::db_error::classify_insert_error;

#[derive(FromRow)]
struct MappingRow {
    original_url: String,
    short_token: String,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(row.original_url, row.short_token, row.created_at)
    }
}

/// PostgreSQL repository for URL mappings.
///
/// Relies on the `url_mappings` schema from `migrations/`:
/// a unique constraint on `short_token`, a unique index on `md5(original_url)`
/// and the `url_mappings_token_seq` sequence.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT original_url, short_token, created_at
            FROM url_mappings
            WHERE md5(original_url) = md5($1) AND original_url = $1
            "#,
        )
        .bind(url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT original_url, short_token, created_at
            FROM url_mappings
            WHERE short_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings (original_url, short_token)
            VALUES ($1, $2)
            RETURNING original_url, short_token, created_at
            "#,
        )
        .bind(&new_mapping.original_url)
        .bind(&new_mapping.short_token)
        .fetch_one(self.pool.as_ref())
        .await
        .map(UrlMapping::from)
        .map_err(|e| classify_insert_error(e, &new_mapping))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_mappings")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn next_sequence(&self) -> Result<i64, StoreError> {
        let value: i64 = sqlx::query_scalar("SELECT nextval('url_mappings_token_seq')")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(value)
    }
}
