//! Classification of PostgreSQL errors raised by mapping inserts.

use crate::domain::entities::NewMapping;
use crate::error::StoreError;

/// Unique constraint on `url_mappings.short_token`.
pub const TOKEN_CONSTRAINT: &str = "url_mappings_short_token_key";

/// Unique index on `md5(url_mappings.original_url)`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "url_mappings_original_url_key";

/// Maps an insert failure to the matching [`StoreError`] variant.
pub fn classify_insert_error(e: sqlx::Error, new_mapping: &NewMapping) -> StoreError {
    let violated = e
        .as_database_error()
        .filter(|db_err| db_err.is_unique_violation())
        .and_then(|db_err| db_err.constraint())
        .map(str::to_owned);

    match violated.as_deref() {
        Some(TOKEN_CONSTRAINT) => StoreError::DuplicateToken(new_mapping.short_token.clone()),
        Some(ORIGINAL_URL_CONSTRAINT) => StoreError::DuplicateUrl(new_mapping.original_url.clone()),
        _ => StoreError::from(e),
    }
}
