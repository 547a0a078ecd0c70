//! Error types shared across the service.
//!
//! - [`StoreError`] is what a [`crate::domain::repositories::MappingRepository`]
//!   reports. Duplicate variants are recovered inside the allocator.
//! - [`AppError`] is what services and handlers return. It renders as a JSON
//!   body of the form `{"error": "...", "code": "...", "details": {...}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Failures reported by a mapping store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The short token is already assigned to another mapping.
    #[error("short token '{0}' is already taken")]
    DuplicateToken(String),

    /// A mapping for this original URL already exists.
    #[error("a mapping for '{0}' already exists")]
    DuplicateUrl(String),

    /// The backend could not be reached or the operation failed.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Unavailable(e.to_string())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    details: Value,
}

/// Application-level error returned by services and HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Submitted input is not an acceptable URL.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// No mapping exists for the requested token.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The store failed or allocation retries were exhausted.
    #[error("{message}")]
    Storage { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: "invalid url".to_string(),
            details: json!({ "reason": reason.into() }),
        }
    }

    pub fn not_found(token: &str) -> Self {
        Self::NotFound {
            message: "not found".to_string(),
            details: json!({ "token": token }),
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for the error class.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::NotFound { .. } => "not_found",
            AppError::Storage { .. } => "storage_error",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::storage(e.to_string(), json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let errors = e.field_errors();
        let fields: Vec<&str> = errors.keys().map(|k| k.as_ref()).collect();
        AppError::InvalidUrl {
            message: "invalid url".to_string(),
            details: json!({ "fields": fields }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, error, details) = match self {
            AppError::InvalidUrl { message, details } => (StatusCode::BAD_REQUEST, message, details),
            AppError::NotFound { message, details } => (StatusCode::NOT_FOUND, message, details),
            AppError::Storage { message, details } => {
                // Storage causes stay in the logs.
                tracing::error!(%details, "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                    Value::Null,
                )
            }
        };

        let body = ErrorBody {
            error,
            code,
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_invalid_url_is_bad_request() {
        let (status, body) = render(AppError::invalid_url("missing host")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid url");
        assert_eq!(body["code"], "invalid_url");
        assert_eq!(body["details"]["reason"], "missing host");
    }

    #[tokio::test]
    async fn test_not_found_is_404() {
        let (status, body) = render(AppError::not_found("abc")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not found");
        assert_eq!(body["details"]["token"], "abc");
    }

    #[tokio::test]
    async fn test_storage_error_hides_cause() {
        let err: AppError = StoreError::Unavailable("connection refused".to_string()).into();
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal error");
        assert_eq!(body["code"], "storage_error");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn test_validation_errors_list_fields() {
        use validator::Validate;

        #[derive(Validate)]
        struct Input {
            #[validate(length(min = 1))]
            url: String,
        }

        let errors = Input { url: String::new() }.validate().unwrap_err();
        let err = AppError::from(errors);

        assert_eq!(err.code(), "invalid_url");
        match err {
            AppError::InvalidUrl { details, .. } => assert_eq!(details["fields"][0], "url"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(
            StoreError::DuplicateToken("42".to_string()).to_string(),
            "short token '42' is already taken"
        );
    }
}
