//! Error types for rgc core.

use thiserror::Error;

/// Result type for rgc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can end an analysis.
///
/// Only fatal conditions are represented here. Recoverable per-entry
/// failures are collected as [`AnalysisWarning`](crate::AnalysisWarning)s
/// instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad repository or project name, invalid configuration or a
    /// missing credential.
    #[error("Invalid input: {message}")]
    Input {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// The content provider could not serve a path the analysis cannot do
    /// without (the root listing).
    #[error("Content provider error at '{path}': {message}")]
    Provider {
        /// Path that failed.
        path: String,
        /// Error message from the provider.
        message: String,
    },

    /// The operation deadline expired.
    #[error("Analysis timed out after {elapsed_ms}ms")]
    Timeout {
        /// Milliseconds elapsed when the deadline fired.
        elapsed_ms: u128,
    },

    /// An invariant broke while exporting the forest.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Description of the broken invariant.
        message: String,
    },

    /// Pattern compilation error.
    #[error("Pattern error: {0}")]
    Pattern(String),
}

impl Error {
    /// Create an input error.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Whether this error belongs to the caller's input rather than the run.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input { .. })
    }
}
