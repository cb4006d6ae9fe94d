//! helmdeck - a terminal client for Helm
//!
//! Browse the chart catalog, install charts, and manage releases and
//! repositories from the terminal, or print the same data headless.

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::{
    ConfigSubcommand, HeadlessCommand, display_version, handle_config_command,
    handle_headless_command, init_logging,
};
use helmdeck::backend::{HelmCli, SharedBackend};
use helmdeck::config::{Config, ConfigLoader};
use std::sync::Arc;

/// helmdeck - a terminal client for browsing Helm charts and managing releases
#[derive(Parser, Debug)]
#[command(name = "helmdeck")]
#[command(about = "A terminal client for browsing Helm charts and managing releases", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// helm executable to use instead of the configured one
    #[arg(long, value_name = "PATH")]
    helm: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
    /// Show version information
    Version,
    #[command(flatten)]
    Headless(HeadlessCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let Args {
        debug,
        helm,
        command,
    } = Args::parse();

    // Config commands work on the file alone
    let command = match command {
        Some(Command::Config { subcommand }) => return handle_config_command(subcommand),
        other => other,
    };

    let log_file = init_logging(debug);
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    let mut config = ConfigLoader::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {:#}", e);
        Config::default()
    });
    if let Some(helm) = helm {
        config.helm.binary = helm;
    }
    tracing::debug!("Configuration loaded: {:?}", config);

    let backend: SharedBackend = Arc::new(HelmCli::new(config.helm.binary.clone()));

    match command {
        Some(Command::Version) => {
            display_version(backend.as_ref()).await;
            Ok(())
        }
        Some(Command::Headless(cmd)) => handle_headless_command(cmd, backend.as_ref()).await,
        Some(Command::Config { .. }) => Ok(()),
        None => run_interactive(backend, config).await,
    }
}

#[cfg(feature = "tui")]
async fn run_interactive(backend: SharedBackend, config: Config) -> Result<()> {
    helmdeck::tui::run_tui(backend, config).await
}

#[cfg(not(feature = "tui"))]
async fn run_interactive(_backend: SharedBackend, _config: Config) -> Result<()> {
    anyhow::bail!("built without the terminal UI; use a subcommand such as `releases`")
}
