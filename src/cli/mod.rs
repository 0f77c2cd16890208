//! CLI entrypoint module structure.
use anyhow::Result;
use serde_json::Value;

use crate::tools::TOOL_DESCRIPTORS;

pub mod args;
pub mod profile;

pub use args::{CliCommand, LaunchProfileArgs, ParsedCommand};
pub use profile::{
    build_launch_args, resolve_api_key, resolve_config_path, CredentialSource, LaunchProfile,
    KAGI_API_KEY_ENV,
};

/// Execute CLI command mode and return a user-facing result payload.
pub fn execute_cli_command(command: CliCommand) -> Result<String> {
    match command {
        CliCommand::Tools => {
            let tools: Vec<Value> = TOOL_DESCRIPTORS.iter().map(|tool| tool.to_json()).collect();
            Ok(serde_json::to_string_pretty(&Value::Array(tools))?)
        }
    }
}
