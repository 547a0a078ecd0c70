//! Mapping entity associating an original URL with its short token.

use chrono::{DateTime, Utc};

/// A persisted URL mapping.
///
/// `short_token` is unique across all mappings and never changes once assigned.
/// `original_url` is stored exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub original_url: String,
    pub short_token: String,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(original_url: String, short_token: String, created_at: DateTime<Utc>) -> Self {
        Self {
            original_url,
            short_token,
            created_at,
        }
    }
}

/// Input data for inserting a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub original_url: String,
    pub short_token: String,
}

impl NewMapping {
    pub fn new(original_url: impl Into<String>, short_token: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            short_token: short_token.into(),
        }
    }

    /// Materializes the mapping with the given creation time.
    pub fn into_mapping(self, created_at: DateTime<Utc>) -> UrlMapping {
        UrlMapping::new(self.original_url, self.short_token, created_at)
    }
}
