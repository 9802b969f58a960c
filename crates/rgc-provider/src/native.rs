//! Local checkout provider using std::fs + tokio.

use crate::provider::{ContentProvider, DirEntry, ProviderError, ProviderErrorKind};
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::task;

/// Serves a project tree from a directory on disk.
///
/// Blocking std::fs calls are wrapped with tokio::spawn_blocking to avoid
/// blocking the async runtime. Symbolic links are not listed.
#[derive(Debug, Clone)]
pub struct LocalProvider {
    project_root: PathBuf,
}

impl LocalProvider {
    /// Create a provider scoped to `project_root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root doesn't exist, can't be canonicalized or
    /// is not a directory.
    pub fn new(project_root: impl AsRef<Path>) -> io::Result<Self> {
        let project_root = project_root.as_ref().canonicalize()?;
        if !project_root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Project root is not a directory: {}", project_root.display()),
            ));
        }
        Ok(Self { project_root })
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve a relative provider path inside the project root.
    ///
    /// # Security
    ///
    /// Absolute paths and `..` components are rejected, so no request can
    /// escape the project directory.
    fn resolve(&self, path: &str) -> Result<PathBuf, ProviderError> {
        let relative = Path::new(path);
        let mut resolved = self.project_root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                    return Err(ProviderError::new(
                        ProviderErrorKind::NotFound,
                        path,
                        "path escapes the project root",
                    ));
                }
            }
        }
        Ok(resolved)
    }
}

fn map_io_error(path: &str, err: io::Error) -> ProviderError {
    let kind = match err.kind() {
        io::ErrorKind::NotFound => ProviderErrorKind::NotFound,
        io::ErrorKind::TimedOut => ProviderErrorKind::TimedOut,
        _ => ProviderErrorKind::Transient,
    };
    ProviderError::new(kind, path, err.to_string())
}

fn map_join_error(path: &str, err: task::JoinError) -> ProviderError {
    ProviderError::new(ProviderErrorKind::Transient, path, err.to_string())
}

#[async_trait::async_trait]
impl ContentProvider for LocalProvider {
    async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>, ProviderError> {
        let dir = self.resolve(path)?;
        let parent = path.to_string();

        let listed = task::spawn_blocking(move || list_directory_sync(&dir, &parent))
            .await
            .map_err(|e| map_join_error(path, e))?;
        listed.map_err(|e| map_io_error(path, e))
    }

    async fn get_file_content(&self, path: &str) -> Result<String, ProviderError> {
        let file = self.resolve(path)?;
        let read = task::spawn_blocking(move || std::fs::read_to_string(&file))
            .await
            .map_err(|e| map_join_error(path, e))?;
        read.map_err(|e| map_io_error(path, e))
    }

    fn describe(&self) -> String {
        format!("local:{}", self.project_root.display())
    }
}

/// Synchronous directory listing, sorted by name.
fn list_directory_sync(dir: &Path, parent: &str) -> io::Result<Vec<DirEntry>> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            continue;
        }

        // Non-UTF-8 names cannot be addressed through the provider API.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };

        if file_type.is_dir() {
            entries.push(DirEntry::dir(parent, name));
        } else if file_type.is_file() {
            let size = entry.metadata()?.len();
            entries.push(DirEntry::file(parent, name, size));
        }
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
