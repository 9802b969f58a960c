//! Analysis options and ignore matching.

use globset::{Glob, GlobSet, GlobSetBuilder};
use rgc_config::AnalysisSettings;
use rgc_core::{Error, Result};
use std::time::Duration;

/// Configuration for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    /// Maximum provider requests in flight
    pub max_concurrency: usize,

    /// Maximum file size to fetch (bytes). Prevents reading huge files.
    pub max_file_size: u64,

    /// Deadline for the whole operation, both phases included
    pub timeout: Duration,

    /// File extensions to consider as source files
    pub extensions: Vec<String>,

    /// Glob patterns matched against project-relative paths
    pub ignore_patterns: Vec<String>,

    /// Directories nested deeper than this are not listed
    pub max_depth: usize,

    /// Keep results applied before the deadline instead of failing
    pub best_effort: bool,

    /// Only register capitalized definitions
    pub components_only: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self::from(&AnalysisSettings::default())
    }
}

impl From<&AnalysisSettings> for AnalyzerOptions {
    fn from(settings: &AnalysisSettings) -> Self {
        Self {
            max_concurrency: settings.max_concurrency,
            max_file_size: settings.max_file_size,
            timeout: settings.timeout(),
            extensions: settings.extensions.clone(),
            ignore_patterns: settings.ignore_patterns.clone(),
            max_depth: settings.max_depth,
            best_effort: settings.best_effort,
            components_only: settings.components_only,
        }
    }
}

impl AnalyzerOptions {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_concurrency == 0 {
            return Err(Error::input("max_concurrency must be at least 1"));
        }
        if self.timeout.is_zero() {
            return Err(Error::input("timeout must be greater than zero"));
        }
        if self.extensions.is_empty() {
            return Err(Error::input("at least one file extension is required"));
        }
        Ok(())
    }

    pub(crate) fn is_source_file(&self, extension: Option<&str>) -> bool {
        extension.is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

/// Compiled ignore patterns.
#[derive(Debug, Clone)]
pub(crate) struct IgnoreMatcher {
    globs: GlobSet,
}

impl IgnoreMatcher {
    pub(crate) fn new(patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                Error::input(format!("Invalid ignore pattern '{}': {}", pattern, e.kind()))
            })?;
            builder.add(glob);
        }
        let globs = builder
            .build()
            .map_err(|e| Error::input(format!("Invalid ignore patterns: {}", e)))?;
        Ok(Self { globs })
    }

    /// Directories are also tested with a trailing slash so `dir/**` prunes
    /// `dir` itself.
    pub(crate) fn is_ignored(&self, path: &str, is_dir: bool) -> bool {
        self.globs.is_match(path) || (is_dir && self.globs.is_match(format!("{}/", path)))
    }
}
