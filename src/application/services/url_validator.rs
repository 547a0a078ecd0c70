//! Boundary validation of submitted URLs.

use tracing::debug;
use url::{Host, Url};

use crate::error::AppError;

/// Longest accepted URL, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a submitted URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL exceeds {} bytes", MAX_URL_LENGTH)]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("Host '{0}' does not resolve")]
    Unresolvable(String),
}

impl From<UrlValidationError> for AppError {
    fn from(e: UrlValidationError) -> Self {
        AppError::invalid_url(e.to_string())
    }
}

/// Checks that input is an absolute `http`/`https` URL with a host, and
/// optionally that the host resolves in DNS.
///
/// Validation never rewrites the input: callers store the original string.
#[derive(Debug, Clone, Default)]
pub struct UrlValidator {
    check_dns: bool,
}

impl UrlValidator {
    /// Creates a validator. With `check_dns`, hostnames must resolve.
    pub fn new(check_dns: bool) -> Self {
        Self { check_dns }
    }

    /// Validates `input`, returning the parsed URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] describing the first failed rule.
    pub async fn validate(&self, input: &str) -> Result<Url, AppError> {
        let url = parse_absolute_url(input)?;

        if self.check_dns {
            ensure_host_resolves(&url).await?;
        }

        Ok(url)
    }
}

/// Syntactic checks: non-empty, bounded length, http(s) scheme, host present.
pub fn parse_absolute_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    // The parser silently drops these, so the stored string would differ from
    // what was validated.
    if input.trim() != input || input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "URL contains whitespace or control characters".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

async fn ensure_host_resolves(url: &Url) -> Result<(), UrlValidationError> {
    let Some(Host::Domain(domain)) = url.host() else {
        // IP literals need no lookup.
        return Ok(());
    };

    let port = url.port_or_known_default().unwrap_or(80);

    match tokio::net::lookup_host((domain, port)).await {
        Ok(mut addrs) => {
            if addrs.next().is_some() {
                Ok(())
            } else {
                Err(UrlValidationError::Unresolvable(domain.to_string()))
            }
        }
        Err(e) => {
            debug!("DNS lookup for {} failed: {}", domain, e);
            Err(UrlValidationError::Unresolvable(domain.to_string()))
        }
    }
}
