//! LaunchProfile and credential/config resolution.
use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::server::config::{CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub const KAGI_API_KEY_ENV: &str = "KAGI_API_KEY";

/// Where the Kagi API key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Cli,
    Env,
    Config,
    Missing,
}

impl CredentialSource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::Cli => "cli",
            CredentialSource::Env => "env",
            CredentialSource::Config => "config",
            CredentialSource::Missing => "missing",
        }
    }
}

/// Resolved launch profile.
#[derive(Debug, Clone)]
pub struct LaunchProfile {
    /// `None` means no file was named and `config.toml` is absent.
    pub config_path: Option<PathBuf>,
    pub api_key_override: Option<String>,
    pub launch_args: Vec<String>,
}

/// Resolve config path in the order: CLI override → env var → `config.toml` if present.
pub fn resolve_config_path(override_path: Option<PathBuf>) -> Result<Option<PathBuf>> {
    let explicit = override_path.or_else(|| {
        env::var_os(CONFIG_ENV_KEY)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    });

    let cwd = env::current_dir().context("failed to obtain current directory")?;
    match explicit {
        Some(path) => Ok(Some(absolutize(&cwd, path))),
        None => {
            let default = cwd.join(DEFAULT_CONFIG_PATH);
            Ok(default.is_file().then_some(default))
        }
    }
}

/// Resolve the API key in the order: CLI override → env var → config file.
pub fn resolve_api_key(
    cli_override: Option<&str>,
    config_key: Option<&str>,
) -> (Option<String>, CredentialSource) {
    if let Some(key) = cli_override.and_then(normalize_key) {
        return (Some(key), CredentialSource::Cli);
    }

    if let Some(key) = env::var(KAGI_API_KEY_ENV)
        .ok()
        .and_then(|v| normalize_key(&v))
    {
        return (Some(key), CredentialSource::Env);
    }

    if let Some(key) = config_key.and_then(normalize_key) {
        return (Some(key), CredentialSource::Config);
    }

    (None, CredentialSource::Missing)
}

/// Build launch arguments suitable for reproduction/logging. Never includes the key.
pub fn build_launch_args(config: Option<&Path>, api_key_from_cli: bool) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(config) = config {
        args.push(format!("--config={}", config.display()));
    }
    if api_key_from_cli {
        args.push("--api-key=<redacted>".to_string());
    }
    args
}

fn absolutize(cwd: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

fn normalize_key(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}
