//! ContentProvider trait for project trees served by any backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirEntry {
    /// Final path component.
    pub name: String,
    /// Path relative to the project root, `/`-separated.
    pub path: String,
    /// Whether the entry is a directory.
    pub is_dir: bool,
    /// File size in bytes (0 for directories).
    pub size_bytes: u64,
}

impl DirEntry {
    pub fn file(parent: &str, name: impl Into<String>, size_bytes: u64) -> Self {
        let name = name.into();
        Self {
            path: join_path(parent, &name),
            name,
            is_dir: false,
            size_bytes,
        }
    }

    pub fn dir(parent: &str, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: join_path(parent, &name),
            name,
            is_dir: true,
            size_bytes: 0,
        }
    }

    /// Extension including the leading dot, if any.
    pub fn extension(&self) -> Option<&str> {
        let dot = self.name.rfind('.')?;
        (dot > 0).then(|| &self.name[dot..])
    }
}

/// Join a relative directory path and an entry name.
///
/// The project root is the empty path.
pub fn join_path(parent: &str, name: &str) -> String {
    let parent = parent.trim_end_matches('/');
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Failure class reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderErrorKind {
    /// The path does not exist.
    NotFound,
    /// The backend refused the request because of rate limits.
    RateLimited,
    /// Any other failure that may succeed on retry.
    Transient,
    /// The request was cancelled or ran past its deadline.
    TimedOut,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderErrorKind::NotFound => "not found",
            ProviderErrorKind::RateLimited => "rate limited",
            ProviderErrorKind::Transient => "transient failure",
            ProviderErrorKind::TimedOut => "timed out",
        };
        f.write_str(label)
    }
}

/// Error returned by [`ContentProvider`] operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind} at '{path}': {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub path: String,
    pub message: String,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn not_found(path: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::NotFound, path, "no such file or directory")
    }

    /// Whether the failure belongs to the cancellation/timeout class, which
    /// aborts a phase instead of degrading a single entry.
    pub fn is_timeout(&self) -> bool {
        self.kind == ProviderErrorKind::TimedOut
    }
}

/// Source of directory listings and file text for one project tree.
///
/// Paths are relative to the project root and `/`-separated; the root itself
/// is the empty path.
///
/// # Design Decisions
///
/// All methods are async: remote backends block on network I/O and local
/// backends offload to the blocking pool. Each call is an independent
/// suspension point, so callers can cancel a single fetch by dropping its
/// future.
#[async_trait::async_trait]
pub trait ContentProvider: Send + Sync {
    /// List the entries of a directory, in a stable order.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderErrorKind::NotFound`] if the directory doesn't exist.
    async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>, ProviderError>;

    /// Read a file as UTF-8 text.
    async fn get_file_content(&self, path: &str) -> Result<String, ProviderError>;

    /// Short human-readable description used in logs (e.g. `github:owner/repo`).
    fn describe(&self) -> String;
}
