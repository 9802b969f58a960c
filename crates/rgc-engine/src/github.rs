//! One-call analysis of a GitHub repository.

use crate::{Analyzer, AnalyzerOptions};
use rgc_config::{ConfigError, ConfigManager};
use rgc_core::{AnalysisReport, ClassificationResult, Error, Result};
use rgc_github::{GitHubOptions, GitHubProvider};
use std::sync::Arc;

/// Classify the components of `owner/project` on GitHub.
///
/// Settings come from `~/.rgc/config.toml` when present; the token is read
/// from the environment variable it names (`GITHUB_TOKEN` by default).
///
/// # Errors
///
/// - [`Error::Input`] for invalid identifiers, invalid config or a missing token
/// - [`Error::Provider`] if the repository root cannot be listed
/// - [`Error::Timeout`] if the deadline expires
pub async fn analyze(owner: &str, project: &str) -> Result<ClassificationResult> {
    let manager = ConfigManager::load_or_default()
        .await
        .map_err(config_error)?;
    analyze_with_config(&manager, owner, project).await
}

/// [`analyze`] with an explicit configuration.
pub async fn analyze_with_config(
    manager: &ConfigManager,
    owner: &str,
    project: &str,
) -> Result<ClassificationResult> {
    let analyzer = github_analyzer(manager, owner, project)?;
    analyzer.analyze("").await
}

/// Full report for `owner/project`, honoring best-effort mode.
pub async fn report_with_config(
    manager: &ConfigManager,
    owner: &str,
    project: &str,
) -> Result<AnalysisReport> {
    let analyzer = github_analyzer(manager, owner, project)?;
    analyzer.run("").await
}

/// Build an analyzer over the GitHub Contents API.
pub fn github_analyzer(manager: &ConfigManager, owner: &str, project: &str) -> Result<Analyzer> {
    let repo = rgc_github::repository(owner, project).map_err(github_error)?;
    manager.validate().map_err(config_error)?;
    let token = manager.github_token().map_err(config_error)?;

    let config = manager.config();
    let options = GitHubOptions {
        api_url: config.github.api_url.clone(),
        token: Some(token),
        requests_per_second: config.github.requests_per_second,
        ..GitHubOptions::default()
    };
    let provider = GitHubProvider::new(repo, options).map_err(github_error)?;

    Analyzer::new(Arc::new(provider), AnalyzerOptions::from(&config.analysis))
}

fn config_error(err: ConfigError) -> Error {
    Error::input(err.to_string())
}

fn github_error(err: rgc_github::Error) -> Error {
    if err.is_input() {
        Error::input(err.to_string())
    } else {
        Error::Provider {
            path: String::new(),
            message: err.to_string(),
        }
    }
}
