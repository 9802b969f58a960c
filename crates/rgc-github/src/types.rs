//! Wire types for the GitHub Contents API

use serde::{Deserialize, Serialize};

/// Parsed repository coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// Repository owner/organization
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepositoryRef {
    /// Create a new RepositoryRef without validation
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Canonical web URL of the repository
    pub fn url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Kind of a contents entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// One item returned by `GET /repos/{owner}/{repo}/contents/{path}`
///
/// Directory requests return an array of these without `content`; file
/// requests return a single object with base64 `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_listing() {
        let json = serde_json::json!([
            { "name": "App.tsx", "path": "src/App.tsx", "type": "file", "size": 120, "sha": "abc" },
            { "name": "components", "path": "src/components", "type": "dir", "size": 0 }
        ]);
        let entries: Vec<ContentEntry> = serde_json::from_value(json).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_type, EntryType::File);
        assert_eq!(entries[0].size, 120);
        assert!(entries[0].content.is_none());
        assert_eq!(entries[1].entry_type, EntryType::Dir);
    }

    #[test]
    fn test_repository_display() {
        let repo = RepositoryRef::new("facebook", "react");
        assert_eq!(repo.to_string(), "facebook/react");
        assert_eq!(repo.url(), "https://github.com/facebook/react");
    }
}
