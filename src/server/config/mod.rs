//! Load and validate server configuration.
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::error;

use crate::lib::errors::ConfigError;

pub mod kagi;
pub mod telemetry;

pub use kagi::{
    apply_engine_override, parse_kagi_section, KagiConfig, RawKagiSection,
    DEFAULT_SUMMARIZER_ENGINE, DEFAULT_TIMEOUT_SECS, SUMMARIZER_ENGINES, SUMMARIZER_ENGINE_ENV,
};

pub const CONFIG_ENV_KEY: &str = "KAGI_MCP_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level configuration container.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    pub kagi: KagiConfig,
    /// `None` when running on built-in defaults.
    pub source_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawServerConfig {
    kagi: Option<RawKagiSection>,
}

impl ServerConfig {
    /// Load from `path` when given, otherwise fall back to defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        telemetry::log_source(path.as_deref());
        let mut config = match path {
            Some(path) => Self::load_from_path(path)?,
            None => Self::default(),
        };

        let label = config.source_label();
        apply_engine_override(&mut config.kagi, Path::new(&label))?;
        telemetry::log_loaded(&config);
        Ok(config)
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        if !path.is_file() {
            let error = ConfigError::NotFound { path: path.clone() };
            error!(
                target: "kagi_mcp::config",
                path = %path.display(),
                reason = %error,
                "Configuration file is missing"
            );
            return Err(error);
        }

        let builder = config::Config::builder().add_source(config::File::from(path.clone()));
        let document = builder.build().map_err(|err| {
            let error = ConfigError::from_read_error(path.clone(), err);
            error!(
                target: "kagi_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to read configuration file"
            );
            error
        })?;

        let raw: RawServerConfig = document.try_deserialize().map_err(|err| {
            let error = ConfigError::from_parse_error(path.clone(), err);
            error!(
                target: "kagi_mcp::config",
                path = %path.display(),
                reason = %error,
                "Failed to parse configuration file"
            );
            error
        })?;

        Self::from_raw(raw, path.clone()).map_err(|err| {
            error!(
                target: "kagi_mcp::config",
                path = %path.display(),
                reason = %err,
                "Failed to validate configuration file"
            );
            err
        })
    }

    /// Human-readable origin of this configuration.
    pub fn source_label(&self) -> String {
        self.source_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "<defaults>".to_string())
    }

    fn from_raw(raw: RawServerConfig, path: PathBuf) -> Result<Self, ConfigError> {
        let kagi = parse_kagi_section(raw.kagi, &path)?;
        Ok(Self {
            kagi,
            source_path: Some(path),
        })
    }
}
