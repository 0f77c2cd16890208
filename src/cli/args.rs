//! CLI argument definitions and `LaunchProfile` construction.
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::{build_launch_args, resolve_config_path, LaunchProfile};

/// Parsed command intent from CLI.
#[derive(Debug, Clone)]
pub enum ParsedCommand {
    RunServer(LaunchProfile),
    Cli(CliCommand),
}

/// Top-level optional CLI commands.
#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Print the registered tools and their input schemas as JSON.
    #[command(about = "Print the registered tools and their input schemas as JSON")]
    Tools,
}

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "kagi-mcp",
    author,
    version,
    about = "Kagi search and summarizer tools over MCP stdio",
    long_about = None
)]
pub struct LaunchProfileArgs {
    /// Path to config.toml (overrides KAGI_MCP_CONFIG).
    #[arg(long = "config")]
    pub config_override: Option<PathBuf>,
    /// Kagi API key (overrides KAGI_API_KEY and the config file).
    #[arg(long = "api-key")]
    pub api_key_override: Option<String>,
    /// Optional CLI command mode.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

impl LaunchProfileArgs {
    /// Build a `LaunchProfile` from CLI args and environment variables.
    pub fn build(self) -> Result<LaunchProfile> {
        let config_path = resolve_config_path(self.config_override)?;
        let launch_args =
            build_launch_args(config_path.as_deref(), self.api_key_override.is_some());

        Ok(LaunchProfile {
            config_path,
            api_key_override: self.api_key_override,
            launch_args,
        })
    }

    /// Parse CLI args into either server launch mode or utility command mode.
    pub fn into_command(self) -> Result<ParsedCommand> {
        match self.command {
            Some(command) => Ok(ParsedCommand::Cli(command)),
            None => Ok(ParsedCommand::RunServer(self.build()?)),
        }
    }
}
