//! HTTP client wrapper with rate limiting

use crate::error::{Error, Result};
use governor::{Quota, RateLimiter};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Client-side rate limiter shared by every request of one client
pub type ApiRateLimiter = Arc<
    RateLimiter<
        governor::state::NotKeyed,
        governor::state::InMemoryState,
        governor::clock::DefaultClock,
    >,
>;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// HTTP client wrapper for GitHub API requests with optional rate limiting
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    rate_limiter: Option<ApiRateLimiter>,
}

impl HttpClient {
    /// Create a new HTTP client
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer token sent with every request
    /// * `timeout` - Per-request timeout; expiry maps to a timed-out provider error
    pub fn new(token: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::other("Invalid GitHub token format"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(format!("rgc/{}", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            rate_limiter: None,
        })
    }

    /// Limit outgoing requests to `requests_per_second`
    pub fn with_rate_limit(mut self, requests_per_second: u32) -> Result<Self> {
        let per_second = NonZeroU32::new(requests_per_second)
            .ok_or_else(|| Error::other("requests_per_second must be greater than zero"))?;
        self.rate_limiter = Some(Arc::new(RateLimiter::direct(Quota::per_second(per_second))));
        Ok(self)
    }

    /// Wait for rate limiter if enabled
    async fn wait_for_rate_limit(&self) {
        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }
    }

    /// Make a GET request and deserialize JSON response
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.wait_for_rate_limit().await;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let remaining = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok());
            return Err(status_error(status, remaining, url));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Map an unsuccessful status to an error.
///
/// GitHub reports an exhausted quota either as 429 or as 403 with
/// `x-ratelimit-remaining: 0`; any other 403 is a plain failure.
pub(crate) fn status_error(status: StatusCode, remaining: Option<&str>, url: &str) -> Error {
    match status {
        StatusCode::NOT_FOUND => Error::NotFound(url.to_string()),
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimitExceeded(url.to_string()),
        StatusCode::FORBIDDEN if remaining.map(str::trim) == Some("0") => {
            Error::RateLimitExceeded(url.to_string())
        }
        _ => Error::Status {
            status: status.as_u16(),
            url: url.to_string(),
        },
    }
}
