use crate::types::{AnalysisSettings, GitHubSettings, RgcConfig};
use globset::Glob;
use thiserror::Error;

/// Configuration values that cannot drive an analysis
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("max_concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("timeout_secs must be at least 1")]
    ZeroTimeout,

    #[error("extensions must not be empty")]
    NoExtensions,

    #[error("Invalid extension '{0}': must start with '.'")]
    InvalidExtension(String),

    #[error("Invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("requests_per_second must be at least 1")]
    ZeroRequestRate,

    #[error("token_env must not be empty")]
    EmptyTokenEnv,
}

impl RgcConfig {
    /// Check every section, reporting the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_analysis(&self.analysis)?;
        validate_github(&self.github)
    }
}

pub fn validate_analysis(settings: &AnalysisSettings) -> Result<(), ValidationError> {
    if settings.max_concurrency == 0 {
        return Err(ValidationError::ZeroConcurrency);
    }
    if settings.timeout_secs == 0 {
        return Err(ValidationError::ZeroTimeout);
    }
    if settings.extensions.is_empty() {
        return Err(ValidationError::NoExtensions);
    }
    if let Some(ext) = settings
        .extensions
        .iter()
        .find(|ext| !ext.starts_with('.') || ext.len() < 2)
    {
        return Err(ValidationError::InvalidExtension(ext.clone()));
    }
    for pattern in &settings.ignore_patterns {
        Glob::new(pattern).map_err(|e| ValidationError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.kind().to_string(),
        })?;
    }
    Ok(())
}

pub fn validate_github(settings: &GitHubSettings) -> Result<(), ValidationError> {
    if settings.requests_per_second == Some(0) {
        return Err(ValidationError::ZeroRequestRate);
    }
    if settings.token_env.trim().is_empty() {
        return Err(ValidationError::EmptyTokenEnv);
    }
    Ok(())
}
