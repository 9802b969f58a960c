//! Concurrent component discovery and usage analysis.
//!
//! The engine runs two phases against a
//! [`ContentProvider`](rgc_provider::ContentProvider):
//!
//! 1. **Walk**: list directories and fetch source files with bounded
//!    concurrency, collecting definition candidates. Candidates are applied
//!    in traversal order, never in completion order, so name collisions
//!    resolve the same way on every run.
//! 2. **Usage**: fetch each defining file once more, scan it for component
//!    tags and link the forest in registry order.
//!
//! Both phases share one deadline. Per-entry failures become warnings;
//! failing to list the root, or running out of time, ends the analysis.

mod analyzer;
mod options;
mod tasks;
mod usage;
mod walker;

#[cfg(feature = "github")]
mod github;

pub use analyzer::Analyzer;
pub use options::AnalyzerOptions;

#[cfg(feature = "github")]
pub use github::{analyze, analyze_with_config, github_analyzer, report_with_config};

pub use rgc_core::{AnalysisReport, ClassificationResult, Error, Result};
