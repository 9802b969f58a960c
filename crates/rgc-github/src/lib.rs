//! GitHub Contents API provider for rgc
//!
//! Implements [`rgc_provider::ContentProvider`] against
//! `GET /repos/{owner}/{repo}/contents/{path}`, so the analysis engine can walk
//! a repository's default branch without cloning it.
//!
//! # Example
//!
//! ```no_run
//! use rgc_github::{parse_repository, GitHubOptions, GitHubProvider};
//! use rgc_provider::ContentProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = parse_repository("https://github.com/facebook/react")?;
//!     let options = GitHubOptions {
//!         token: std::env::var("GITHUB_TOKEN").ok(),
//!         ..GitHubOptions::default()
//!     };
//!     let provider = GitHubProvider::new(repo, options)?;
//!
//!     for entry in provider.list_directory("").await? {
//!         println!("{}{}", entry.path, if entry.is_dir { "/" } else { "" });
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Rate limits
//!
//! GitHub allows 60 requests/hour unauthenticated and 5000 requests/hour with
//! a token. Exhausted quota surfaces as
//! [`ProviderErrorKind::RateLimited`](rgc_provider::ProviderErrorKind::RateLimited);
//! `requests_per_second` adds a client-side limiter on top.

mod client;
mod error;
mod github;
mod repository;
mod types;

pub use error::{Error, Result};
pub use github::{GitHubOptions, GitHubProvider, GITHUB_API_URL};
pub use repository::{parse_repository, repository};
pub use types::{ContentEntry, EntryType, RepositoryRef};
