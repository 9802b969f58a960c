//! The default command: analyze a repository and print the report.

use crate::formatters::{Formatter, HumanFormatter, JsonFormatter};
use crate::OutputFormat;
use anyhow::{Context, Result};
use rgc_config::{AnalysisSettings, ConfigManager};
use rgc_core::AnalysisReport;
use rgc_engine::{Analyzer, AnalyzerOptions};
use rgc_github::{parse_repository, GitHubOptions, GitHubProvider};
use rgc_provider::{ContentProvider, LocalProvider};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::debug;

/// Where the sources come from.
#[derive(Debug, Clone)]
pub enum Target {
    Local(PathBuf),
    /// `owner/repo`, an https URL or an ssh remote.
    GitHub(String),
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub concurrency: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub best_effort: bool,
    pub components_only: bool,
}

impl Overrides {
    pub fn apply(&self, settings: &mut AnalysisSettings) {
        if let Some(concurrency) = self.concurrency {
            settings.max_concurrency = concurrency;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            settings.timeout_secs = timeout_secs;
        }
        // Flags can only switch these on; the file may already have.
        settings.best_effort |= self.best_effort;
        settings.components_only |= self.components_only;
    }
}

pub struct AnalysisRunOptions {
    pub target: Target,
    pub root: String,
    pub config: Option<PathBuf>,
    pub overrides: Overrides,
    pub format: OutputFormat,
}

/// Run the analysis and print the report.
///
/// Returns whether the report is complete.
pub fn run_analysis(opts: &AnalysisRunOptions) -> Result<bool> {
    let runtime = Runtime::new().context("Failed to create tokio runtime")?;
    let report = runtime.block_on(analyze_target(opts))?;

    let formatter: Box<dyn Formatter> = match opts.format {
        OutputFormat::Human => Box::new(HumanFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };
    formatter.format(&report);

    Ok(report.complete)
}

async fn analyze_target(opts: &AnalysisRunOptions) -> Result<AnalysisReport> {
    let mut manager = load_config(opts.config.as_deref()).await?;
    opts.overrides.apply(&mut manager.config_mut().analysis);
    manager.validate().context("Invalid configuration")?;

    let provider = build_provider(&opts.target, &manager)?;
    let description = provider.describe();
    debug!(provider = %description, root = %opts.root, "Provider ready");
    let analyzer = Analyzer::new(provider, AnalyzerOptions::from(&manager.config().analysis))
        .context("Failed to create analyzer")?;

    analyzer
        .run(&opts.root)
        .await
        .with_context(|| format!("Analysis of {} failed", description))
}

async fn load_config(path: Option<&Path>) -> Result<ConfigManager> {
    match path {
        Some(path) => ConfigManager::load_from(path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => ConfigManager::load_or_default()
            .await
            .context("Failed to load config"),
    }
}

fn build_provider(target: &Target, manager: &ConfigManager) -> Result<Arc<dyn ContentProvider>> {
    match target {
        Target::Local(dir) => {
            let provider = LocalProvider::new(dir)
                .with_context(|| format!("Cannot analyze {}", dir.display()))?;
            Ok(Arc::new(provider))
        }
        Target::GitHub(input) => {
            let repo = parse_repository(input)
                .with_context(|| format!("Invalid repository '{}'", input))?;
            let token = manager.github_token()?;
            let settings = &manager.config().github;
            let options = GitHubOptions {
                api_url: settings.api_url.clone(),
                token: Some(token),
                requests_per_second: settings.requests_per_second,
                ..GitHubOptions::default()
            };
            let provider = GitHubProvider::new(repo, options)
                .context("Failed to create GitHub client")?;
            Ok(Arc::new(provider))
        }
    }
}
