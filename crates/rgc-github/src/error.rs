//! Error types for rgc-github

use rgc_provider::ProviderErrorKind;
use thiserror::Error;

/// Result type alias for rgc-github operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for rgc-github operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid repository URL format
    #[error("Invalid repository URL format: {0}")]
    InvalidRepositoryUrl(String),

    /// Unsupported repository host
    #[error("Unsupported repository host: {0} (only GitHub is supported)")]
    UnsupportedRepositoryHost(String),

    /// Owner or repository name that GitHub would never accept
    #[error("Invalid {field}: '{value}'")]
    InvalidIdentifier { field: &'static str, value: String },

    /// Path does not exist in the repository (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (HTTP 429, or 403 with no remaining quota)
    #[error("Rate limit exceeded for URL: {0}")]
    RateLimitExceeded(String),

    /// Any other unsuccessful HTTP status
    #[error("HTTP request failed with status {status}: {url}")]
    Status { status: u16, url: String },

    /// File content could not be decoded to UTF-8 text
    #[error("Failed to decode content of '{path}': {message}")]
    Decode { path: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Whether the error describes the caller's input rather than a request.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidRepositoryUrl(_)
                | Self::UnsupportedRepositoryHost(_)
                | Self::InvalidIdentifier { .. }
        )
    }

    /// Failure class seen by the analysis engine.
    pub fn provider_kind(&self) -> ProviderErrorKind {
        match self {
            Self::NotFound(_) => ProviderErrorKind::NotFound,
            Self::RateLimitExceeded(_) => ProviderErrorKind::RateLimited,
            Self::Http(e) if e.is_timeout() => ProviderErrorKind::TimedOut,
            _ => ProviderErrorKind::Transient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind() {
        assert_eq!(
            Error::NotFound("x".into()).provider_kind(),
            ProviderErrorKind::NotFound
        );
        assert_eq!(
            Error::RateLimitExceeded("x".into()).provider_kind(),
            ProviderErrorKind::RateLimited
        );
        assert_eq!(
            Error::Status {
                status: 500,
                url: "x".into()
            }
            .provider_kind(),
            ProviderErrorKind::Transient
        );
    }

    #[test]
    fn test_is_input() {
        assert!(Error::UnsupportedRepositoryHost("gitlab.com".into()).is_input());
        assert!(!Error::other("boom").is_input());
    }
}
