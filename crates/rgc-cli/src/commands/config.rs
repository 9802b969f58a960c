use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use rgc_config::ConfigManager;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Initialize config file at ~/.rgc/config.toml
    Init,

    /// Show config file path
    Path,

    /// Validate config file
    Validate,

    /// Print the effective configuration
    Show,
}

/// `explicit` is the global `--config` path, if one was given.
pub fn handle_config_command(cmd: ConfigCommand, explicit: Option<PathBuf>) -> Result<()> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;

    runtime.block_on(async {
        let config_path = match explicit {
            Some(path) => path,
            None => ConfigManager::config_path()?,
        };

        match cmd {
            ConfigCommand::Init => init_config(&config_path).await,
            ConfigCommand::Path => {
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigCommand::Validate => validate_config(&config_path).await,
            ConfigCommand::Show => show_config(&config_path).await,
        }
    })
}

async fn init_config(config_path: &Path) -> Result<()> {
    if tokio::fs::try_exists(config_path).await? {
        println!("Config already exists at: {}", config_path.display());
        println!("To reinitialize, please delete the existing config first.");
        return Ok(());
    }

    ConfigManager::init_at(config_path)
        .await
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!("{} Initialized config at: {}", "✓".green(), config_path.display());
    Ok(())
}

async fn validate_config(config_path: &Path) -> Result<()> {
    let manager = ConfigManager::load_from(config_path)
        .await
        .with_context(|| format!("Invalid config at {}", config_path.display()))?;

    println!("{} Config is valid: {}", "✓".green(), config_path.display());
    let github = &manager.config().github;
    if manager.github_token().is_err() {
        println!(
            "  {} ${} is not set; GitHub analysis will fail",
            "!".yellow(),
            github.token_env
        );
    }
    Ok(())
}

async fn show_config(config_path: &Path) -> Result<()> {
    let manager = match ConfigManager::load_from(config_path).await {
        Ok(manager) => manager,
        Err(rgc_config::ConfigError::ConfigNotFound(_)) => {
            eprintln!("No config at {}, showing defaults", config_path.display());
            ConfigManager::with_config(Default::default())
        }
        Err(e) => return Err(e).context("Failed to load config"),
    };

    let analysis = &manager.config().analysis;
    println!("{}", "[analysis]".bold());
    println!("  max_concurrency: {}", analysis.max_concurrency);
    println!("  max_file_size:   {}", analysis.max_file_size);
    println!("  timeout_secs:    {}", analysis.timeout_secs);
    println!("  extensions:      {}", analysis.extensions.join(", "));
    println!("  ignore_patterns: {}", analysis.ignore_patterns.join(", "));
    println!("  max_depth:       {}", analysis.max_depth);
    println!("  best_effort:     {}", analysis.best_effort);
    println!("  components_only: {}", analysis.components_only);

    let github = &manager.config().github;
    println!("{}", "[github]".bold());
    println!("  api_url:   {}", github.api_url);
    println!("  token_env: {}", github.token_env);
    match github.requests_per_second {
        Some(rps) => println!("  requests_per_second: {}", rps),
        None => println!("  requests_per_second: unlimited"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_validate() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        handle_config_command(ConfigCommand::Init, Some(path.clone())).unwrap();
        assert!(path.exists());
        handle_config_command(ConfigCommand::Validate, Some(path.clone())).unwrap();
        // A second init leaves the file alone.
        handle_config_command(ConfigCommand::Init, Some(path)).unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analysis]\nmax_concurrency = 0\n").unwrap();

        assert!(handle_config_command(ConfigCommand::Validate, Some(path)).is_err());
    }
}
