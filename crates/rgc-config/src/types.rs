use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration structure for rgc
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RgcConfig {
    /// Traversal and analysis settings
    #[serde(default)]
    pub analysis: AnalysisSettings,

    /// GitHub connection settings
    #[serde(default)]
    pub github: GitHubSettings,
}

/// Settings for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisSettings {
    /// Max provider requests in flight
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Files larger than this many bytes are skipped
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Wall-clock budget for the whole operation
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extensions of scanned files, with the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns of paths never listed or fetched
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Directories nested deeper than this are not listed
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Return partial results instead of failing when the deadline expires
    #[serde(default)]
    pub best_effort: bool,

    /// Keep only PascalCase definitions
    #[serde(default)]
    pub components_only: bool,
}

impl AnalysisSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            max_file_size: default_max_file_size(),
            timeout_secs: default_timeout_secs(),
            extensions: default_extensions(),
            ignore_patterns: default_ignore_patterns(),
            max_depth: default_max_depth(),
            best_effort: false,
            components_only: false,
        }
    }
}

/// GitHub API settings
///
/// The token itself is never stored in the file; only the name of the
/// environment variable holding it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitHubSettings {
    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Optional client-side request rate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_per_second: Option<u32>,
}

impl Default for GitHubSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token_env: default_token_env(),
            requests_per_second: None,
        }
    }
}

fn default_max_concurrency() -> usize {
    8
}

fn default_max_file_size() -> u64 {
    1_000_000
}

fn default_timeout_secs() -> u64 {
    75
}

fn default_extensions() -> Vec<String> {
    [".js", ".jsx", ".ts", ".tsx"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_ignore_patterns() -> Vec<String> {
    ["**/node_modules/**", "**/.git/**"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_depth() -> usize {
    100
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}
