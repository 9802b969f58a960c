//! rgc CLI - find used and unused React components.

mod cli;
mod commands;
mod formatters;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rgc")]
#[command(version, about = "Find used and unused React components in a repository", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// GitHub repository to analyze
    ///
    /// Examples:
    ///   rgc facebook/react
    ///   rgc https://github.com/facebook/react.git
    ///   rgc git@github.com:facebook/react.git
    #[arg(value_name = "REPOSITORY")]
    repository: Option<String>,

    /// Analyze a local directory instead of a GitHub repository
    #[arg(long, value_name = "DIR", conflicts_with = "repository")]
    local: Option<PathBuf>,

    /// Subdirectory to start from (defaults to the repository root)
    #[arg(long, value_name = "PATH", default_value = "")]
    root: String,

    /// Configuration file path (defaults to ~/.rgc/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Max provider requests in flight
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Deadline for the whole analysis, in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Report partial results when the deadline expires
    #[arg(long)]
    best_effort: bool,

    /// Only register capitalized definitions
    #[arg(long)]
    components_only: bool,

    /// Output format
    #[arg(short, long = "output", value_enum, default_value = "human")]
    format: OutputFormat,

    /// Verbose output (-v info, -vv debug)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output JSON format (alias for --output json)
    #[arg(long)]
    json: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Manage rgc configuration
    Config {
        #[command(subcommand)]
        command: commands::ConfigCommand,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli::logging::init_logging(cli.verbose);

    match cli.command {
        Some(Command::Config { command }) => commands::handle_config_command(command, cli.config),
        None => {
            let target = match (cli.local, cli.repository) {
                (Some(dir), _) => cli::analysis::Target::Local(dir),
                (None, Some(repo)) => cli::analysis::Target::GitHub(repo),
                (None, None) => anyhow::bail!("Specify a repository or --local <DIR>"),
            };

            let complete = cli::analysis::run_analysis(&cli::analysis::AnalysisRunOptions {
                target,
                root: cli.root,
                config: cli.config,
                overrides: cli::analysis::Overrides {
                    concurrency: cli.concurrency,
                    timeout_secs: cli.timeout,
                    best_effort: cli.best_effort,
                    components_only: cli.components_only,
                },
                format: if cli.json {
                    OutputFormat::Json
                } else {
                    cli.format
                },
            })?;

            if !complete {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
