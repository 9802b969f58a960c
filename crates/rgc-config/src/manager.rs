use crate::types::RgcConfig;
use crate::validate::ValidationError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config management
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),

    #[error("GitHub token not set: export {0}")]
    MissingToken(String),

    #[error("Home directory not found")]
    HomeNotFound,
}

/// Manager for rgc configuration
///
/// Global configuration lives in ~/.rgc/config.toml. A missing file is not an
/// error for [`ConfigManager::load_or_default`]; every field has a default.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    config: RgcConfig,
}

impl ConfigManager {
    /// Get the default config path (~/.rgc/config.toml)
    #[cfg(feature = "native-fs")]
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(home.join(".rgc").join("config.toml"))
    }

    /// Load config from the default location, falling back to defaults when
    /// the file doesn't exist
    #[cfg(feature = "native-fs")]
    pub async fn load_or_default() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        match Self::load_from(&config_path).await {
            Err(ConfigError::ConfigNotFound(_)) => Ok(Self::with_config(RgcConfig::default())),
            other => other,
        }
    }

    /// Load and validate config from a specific path
    pub async fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !tokio::fs::try_exists(path).await? {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let config: RgcConfig = toml::from_str(&contents)?;
        config.validate()?;

        Ok(Self {
            config_path: Some(path.to_path_buf()),
            config,
        })
    }

    /// Wrap an in-memory config (no backing file)
    pub fn with_config(config: RgcConfig) -> Self {
        Self {
            config_path: None,
            config,
        }
    }

    /// Write the default config to `path`, creating parent directories
    ///
    /// Uses a temporary file and atomic rename to prevent corruption
    pub async fn init_at(path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let config = RgcConfig::default();
        let toml_str = toml::to_string_pretty(&config)?;
        let temp_path = path.with_extension("toml.tmp");
        tokio::fs::write(&temp_path, toml_str).await?;
        tokio::fs::rename(&temp_path, path).await?;

        Ok(Self {
            config_path: Some(path.to_path_buf()),
            config,
        })
    }

    /// File the config was loaded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Get reference to config
    pub fn config(&self) -> &RgcConfig {
        &self.config
    }

    /// Get mutable reference to config (for command-line overrides)
    pub fn config_mut(&mut self) -> &mut RgcConfig {
        &mut self.config
    }

    /// Re-check the config after overrides were applied
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(self.config.validate()?)
    }

    /// Read the GitHub token from the configured environment variable
    pub fn github_token(&self) -> Result<String, ConfigError> {
        let var = &self.config.github.token_env;
        match std::env::var(var) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(ConfigError::MissingToken(var.clone())),
        }
    }
}
