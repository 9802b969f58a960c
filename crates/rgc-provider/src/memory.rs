//! In-memory provider.
//!
//! Files are registered up front (from tests, or from a host that already
//! holds the project text). Failures and latency can be injected per path to
//! exercise the engine's recovery and deadline handling.

use crate::provider::{ContentProvider, DirEntry, ProviderError, ProviderErrorKind};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<String, String>,
    failures: HashMap<String, ProviderErrorKind>,
    delays: HashMap<String, Duration>,
    fetched: Vec<String>,
    listed: Vec<String>,
}

/// In-memory project tree.
///
/// # Thread Safety
///
/// Uses `Arc<RwLock<..>>` for interior mutability:
/// - Concurrent readers while the engine runs
/// - Exclusive writer during setup and for the request log
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    state: Arc<RwLock<State>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a provider from `(path, contents)` pairs.
    pub fn from_files<P, C>(files: impl IntoIterator<Item = (P, C)>) -> Self
    where
        P: Into<String>,
        C: Into<String>,
    {
        let provider = Self::new();
        for (path, contents) in files {
            provider.add_file(path, contents);
        }
        provider
    }

    /// Add or replace a file. Parent directories exist implicitly.
    pub fn add_file(&self, path: impl Into<String>, contents: impl Into<String>) {
        let path = normalize(&path.into());
        self.state.write().files.insert(path, contents.into());
    }

    /// Make every request for `path` fail with `kind`.
    pub fn fail_path(&self, path: impl Into<String>, kind: ProviderErrorKind) {
        self.state.write().failures.insert(normalize(&path.into()), kind);
    }

    /// Delay every request for `path` by `delay` before answering.
    pub fn delay_path(&self, path: impl Into<String>, delay: Duration) {
        self.state.write().delays.insert(normalize(&path.into()), delay);
    }

    /// Paths passed to `get_file_content`, in request order.
    pub fn fetched(&self) -> Vec<String> {
        self.state.read().fetched.clone()
    }

    /// Paths passed to `list_directory`, in request order.
    pub fn listed(&self) -> Vec<String> {
        self.state.read().listed.clone()
    }

    async fn before_request(&self, path: &str) -> Result<(), ProviderError> {
        let delay = self.state.read().delays.get(path).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.state.read().failures.get(path) {
            Some(kind) => Err(ProviderError::new(*kind, path, "injected failure")),
            None => Ok(()),
        }
    }
}

fn normalize(path: &str) -> String {
    path.trim_matches('/').to_string()
}

#[async_trait::async_trait]
impl ContentProvider for MemoryProvider {
    async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>, ProviderError> {
        let path = normalize(path);
        self.state.write().listed.push(path.clone());
        self.before_request(&path).await?;

        let prefix = if path.is_empty() {
            String::new()
        } else {
            format!("{path}/")
        };

        let state = self.state.read();
        let mut entries: BTreeMap<String, DirEntry> = BTreeMap::new();
        for (file, contents) in state.files.range(prefix.clone()..) {
            let Some(rest) = file.strip_prefix(&prefix) else {
                break;
            };
            match rest.split_once('/') {
                Some((dir, _)) => {
                    entries
                        .entry(dir.to_string())
                        .or_insert_with(|| DirEntry::dir(&path, dir));
                }
                None => {
                    entries.insert(
                        rest.to_string(),
                        DirEntry::file(&path, rest, contents.len() as u64),
                    );
                }
            }
        }

        if entries.is_empty() && !path.is_empty() {
            return Err(ProviderError::not_found(path));
        }
        Ok(entries.into_values().collect())
    }

    async fn get_file_content(&self, path: &str) -> Result<String, ProviderError> {
        let path = normalize(path);
        self.state.write().fetched.push(path.clone());
        self.before_request(&path).await?;

        self.state
            .read()
            .files
            .get(&path)
            .cloned()
            .ok_or_else(|| ProviderError::not_found(path.clone()))
    }

    fn describe(&self) -> String {
        format!("memory:{} files", self.state.read().files.len())
    }
}
