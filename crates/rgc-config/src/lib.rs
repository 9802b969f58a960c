pub mod manager;
pub mod types;
pub mod validate;

pub use manager::{ConfigError, ConfigManager};
pub use types::{AnalysisSettings, GitHubSettings, RgcConfig};
pub use validate::{validate_analysis, validate_github, ValidationError};
