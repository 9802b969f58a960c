//! Repository reference parsing and validation

use crate::error::{Error, Result};
use crate::types::RepositoryRef;
use url::Url;

/// Parse a repository reference
///
/// Supports:
/// - owner/repo
/// - https://github.com/owner/repo
/// - https://github.com/owner/repo.git
/// - git+https://github.com/owner/repo.git
/// - ssh://git@github.com/owner/repo.git
/// - git@github.com:owner/repo.git
pub fn parse_repository(input: &str) -> Result<RepositoryRef> {
    let input = input.trim();
    let input = input.strip_prefix("git+").unwrap_or(input);
    let input = input.strip_suffix('/').unwrap_or(input);
    let input = input.strip_suffix(".git").unwrap_or(input);

    // Handle SSH format: git@github.com:owner/repo
    if let Some(ssh_part) = input.strip_prefix("git@") {
        return parse_ssh(ssh_part);
    }

    if !input.contains("://") {
        let (owner, repo) = input.split_once('/').ok_or_else(|| {
            Error::InvalidRepositoryUrl(format!("Expected owner/repo, got: {}", input))
        })?;
        return repository(owner, repo);
    }

    let url = Url::parse(input)
        .map_err(|_| Error::InvalidRepositoryUrl(format!("Could not parse URL: {}", input)))?;

    let host = url
        .host_str()
        .ok_or_else(|| Error::InvalidRepositoryUrl(format!("No host found in URL: {}", input)))?;

    if host != "github.com" && host != "www.github.com" {
        return Err(Error::UnsupportedRepositoryHost(host.to_string()));
    }

    let path = url.path().trim_matches('/');
    let mut parts = path.split('/');
    match (parts.next(), parts.next()) {
        (Some(owner), Some(repo)) => repository(owner, repo.trim_end_matches(".git")),
        _ => Err(Error::InvalidRepositoryUrl(format!(
            "Could not extract owner/repo from path: {}",
            path
        ))),
    }
}

/// Parse SSH-style reference: github.com:owner/repo
fn parse_ssh(ssh_part: &str) -> Result<RepositoryRef> {
    let (host, path) = ssh_part.split_once(':').ok_or_else(|| {
        Error::InvalidRepositoryUrl(format!("Invalid SSH URL format: git@{}", ssh_part))
    })?;

    if host != "github.com" {
        return Err(Error::UnsupportedRepositoryHost(host.to_string()));
    }

    let (owner, repo) = path.split_once('/').ok_or_else(|| {
        Error::InvalidRepositoryUrl(format!("Could not extract owner/repo from SSH path: {}", path))
    })?;
    repository(owner, repo)
}

/// Build a validated [`RepositoryRef`].
pub fn repository(owner: &str, repo: &str) -> Result<RepositoryRef> {
    validate_owner(owner)?;
    validate_repo(repo)?;
    Ok(RepositoryRef::new(owner, repo))
}

/// GitHub logins: 1-39 ASCII alphanumerics or single hyphens, not at either end.
fn validate_owner(owner: &str) -> Result<()> {
    let valid = (1..=39).contains(&owner.len())
        && owner.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !owner.starts_with('-')
        && !owner.ends_with('-')
        && !owner.contains("--");
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            field: "owner",
            value: owner.to_string(),
        })
    }
}

fn validate_repo(repo: &str) -> Result<()> {
    let valid = (1..=100).contains(&repo.len())
        && repo
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && repo != "."
        && repo != "..";
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidIdentifier {
            field: "repository",
            value: repo.to_string(),
        })
    }
}
