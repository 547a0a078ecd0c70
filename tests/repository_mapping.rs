//! PostgreSQL repository tests. Require a database:
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test repository_mapping -- --ignored
//! ```

use sqlx::PgPool;
use std::sync::Arc;

use shorturl::domain::entities::NewMapping;
use shorturl::domain::repositories::MappingRepository;
use shorturl::error::StoreError;
use shorturl::infrastructure::persistence::PgMappingRepository;

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_insert_and_find(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    let mapping = repo
        .insert(NewMapping::new("https://example.com/a", "abc1234"))
        .await
        .unwrap();
    assert_eq!(mapping.short_token, "abc1234");

    let by_token = repo.find_by_token("abc1234").await.unwrap().unwrap();
    assert_eq!(by_token.original_url, "https://example.com/a");

    let by_url = repo
        .find_by_original_url("https://example.com/a")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_url.short_token, "abc1234");
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_find_not_found(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));

    assert!(repo.find_by_token("missing").await.unwrap().is_none());
    assert!(
        repo.find_by_original_url("https://example.com/missing")
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_token(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    repo.insert(NewMapping::new("https://example.com/a", "same"))
        .await
        .unwrap();

    let result = repo
        .insert(NewMapping::new("https://example.com/b", "same"))
        .await;

    assert_eq!(result, Err(StoreError::DuplicateToken("same".to_string())));
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_duplicate_url(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    repo.insert(NewMapping::new("https://example.com/a", "one"))
        .await
        .unwrap();

    let result = repo
        .insert(NewMapping::new("https://example.com/a", "two"))
        .await;

    assert_eq!(
        result,
        Err(StoreError::DuplicateUrl("https://example.com/a".to_string()))
    );
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_count_and_sequence(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    assert_eq!(repo.count().await.unwrap(), 0);

    repo.insert(NewMapping::new("https://example.com/1", "1"))
        .await
        .unwrap();
    assert_eq!(repo.count().await.unwrap(), 1);

    let first = repo.next_sequence().await.unwrap();
    let second = repo.next_sequence().await.unwrap();
    assert!(second > first);
}

#[sqlx::test]
#[ignore = "requires PostgreSQL (DATABASE_URL)"]
async fn test_long_url_round_trip(pool: PgPool) {
    let repo = PgMappingRepository::new(Arc::new(pool));
    let url = format!("https://example.com/{}", "x".repeat(4000));

    repo.insert(NewMapping::new(url.clone(), "long")).await.unwrap();

    let found = repo.find_by_original_url(&url).await.unwrap().unwrap();
    assert_eq!(found.short_token, "long");
}
