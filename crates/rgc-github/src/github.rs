//! ContentProvider backed by the GitHub Contents API

use crate::client::HttpClient;
use crate::error::{Error, Result};
use crate::types::{ContentEntry, EntryType, RepositoryRef};
use base64::{engine::general_purpose, Engine as _};
use rgc_provider::{ContentProvider, DirEntry, ProviderError};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default API endpoint.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// Connection settings for [`GitHubProvider`].
#[derive(Debug, Clone)]
pub struct GitHubOptions {
    /// API base URL (override for GitHub Enterprise or a mock server).
    pub api_url: String,
    /// Bearer token. Unauthenticated requests get 60 requests/hour.
    pub token: Option<String>,
    /// Optional client-side request rate.
    pub requests_per_second: Option<u32>,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for GitHubOptions {
    fn default() -> Self {
        Self {
            api_url: GITHUB_API_URL.to_string(),
            token: None,
            requests_per_second: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Serves one repository's default branch through the Contents API.
#[derive(Debug, Clone)]
pub struct GitHubProvider {
    client: HttpClient,
    api_url: Url,
    repo: RepositoryRef,
}

impl GitHubProvider {
    /// Create a provider for `repo`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API URL doesn't parse or the HTTP client cannot
    /// be initialized.
    pub fn new(repo: RepositoryRef, options: GitHubOptions) -> Result<Self> {
        let api_url = Url::parse(&options.api_url)?;
        if api_url.cannot_be_a_base() {
            return Err(Error::InvalidRepositoryUrl(format!(
                "API URL cannot be a base: {}",
                options.api_url
            )));
        }

        let mut client = HttpClient::new(options.token.as_deref(), options.request_timeout)?;
        if let Some(rps) = options.requests_per_second {
            client = client.with_rate_limit(rps)?;
        }

        Ok(Self {
            client,
            api_url,
            repo,
        })
    }

    pub fn repository(&self) -> &RepositoryRef {
        &self.repo
    }

    /// `{api}/repos/{owner}/{repo}/contents/{path}` with each segment escaped.
    fn contents_url(&self, path: &str) -> Result<String> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::other("API URL cannot be a base"))?
            .pop_if_empty()
            .extend(["repos", self.repo.owner.as_str(), self.repo.repo.as_str(), "contents"])
            .extend(path.split('/').filter(|s| !s.is_empty()));
        Ok(url.into())
    }

    async fn fetch_listing(&self, path: &str) -> Result<Vec<DirEntry>> {
        let url = self.contents_url(path)?;
        debug!(%url, "Listing directory");
        let listing: Vec<ContentEntry> = self.client.get_json(&url).await?;
        Ok(to_dir_entries(listing))
    }

    async fn fetch_file(&self, path: &str) -> Result<String> {
        let url = self.contents_url(path)?;
        debug!(%url, "Fetching file");
        let entry: ContentEntry = self.client.get_json(&url).await?;
        decode_content(&entry)
    }
}

fn to_provider_error(path: &str, err: Error) -> ProviderError {
    ProviderError::new(err.provider_kind(), path, err.to_string())
}

/// Convert an API listing, dropping symlinks and submodules.
fn to_dir_entries(listing: Vec<ContentEntry>) -> Vec<DirEntry> {
    let mut entries: Vec<DirEntry> = listing
        .into_iter()
        .filter_map(|entry| match entry.entry_type {
            EntryType::File => Some(DirEntry {
                name: entry.name,
                path: entry.path,
                is_dir: false,
                size_bytes: entry.size,
            }),
            EntryType::Dir => Some(DirEntry {
                name: entry.name,
                path: entry.path,
                is_dir: true,
                size_bytes: 0,
            }),
            EntryType::Symlink | EntryType::Submodule => None,
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Decode the inline base64 payload of a file entry.
///
/// GitHub wraps the payload at 60 columns and omits it (encoding `none`) for
/// files above 1 MB.
fn decode_content(entry: &ContentEntry) -> Result<String> {
    let decode_error = |message: String| Error::Decode {
        path: entry.path.clone(),
        message,
    };

    if entry.entry_type != EntryType::File {
        return Err(decode_error(format!("not a file ({:?})", entry.entry_type)));
    }
    match entry.encoding.as_deref() {
        Some("base64") => {}
        other => {
            return Err(decode_error(format!(
                "content not inlined (encoding {})",
                other.unwrap_or("missing")
            )))
        }
    }

    let payload: String = entry
        .content
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| decode_error(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| decode_error(e.to_string()))
}

#[async_trait::async_trait]
impl ContentProvider for GitHubProvider {
    async fn list_directory(&self, path: &str) -> std::result::Result<Vec<DirEntry>, ProviderError> {
        self.fetch_listing(path)
            .await
            .map_err(|e| to_provider_error(path, e))
    }

    async fn get_file_content(&self, path: &str) -> std::result::Result<String, ProviderError> {
        self.fetch_file(path)
            .await
            .map_err(|e| to_provider_error(path, e))
    }

    fn describe(&self) -> String {
        format!("github:{}", self.repo)
    }
}
