use std::{env, path::Path, time::Duration};

use serde::Deserialize;

use crate::{lib::errors::ConfigError, provider::DEFAULT_BASE_URL};

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SUMMARIZER_ENGINE: &str = "cecil";
pub const SUMMARIZER_ENGINES: &[&str] = &["cecil", "agnes", "daphne", "muriel"];
pub const SUMMARIZER_ENGINE_ENV: &str = "KAGI_SUMMARIZER_ENGINE";

/// Kagi provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KagiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub summarizer_engine: String,
}

impl Default for KagiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            summarizer_engine: DEFAULT_SUMMARIZER_ENGINE.to_string(),
        }
    }
}

impl KagiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct RawKagiSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub summarizer_engine: Option<String>,
}

pub fn parse_kagi_section(
    raw: Option<RawKagiSection>,
    path: &Path,
) -> Result<KagiConfig, ConfigError> {
    let kagi_raw = raw.unwrap_or_default();

    let api_key = kagi_raw
        .api_key
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    let base_url = kagi_raw
        .base_url
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    validate_base_url(path, &base_url)?;

    let timeout_secs = kagi_raw.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
    validate_timeout(path, timeout_secs)?;

    let summarizer_engine = kagi_raw
        .summarizer_engine
        .unwrap_or_else(|| DEFAULT_SUMMARIZER_ENGINE.to_string());
    validate_engine(path, &summarizer_engine)?;

    Ok(KagiConfig {
        api_key,
        base_url,
        timeout_secs,
        summarizer_engine,
    })
}

/// Apply `KAGI_SUMMARIZER_ENGINE` on top of the file value.
pub fn apply_engine_override(config: &mut KagiConfig, path: &Path) -> Result<(), ConfigError> {
    let Some(engine) = env::var(SUMMARIZER_ENGINE_ENV)
        .ok()
        .map(|value| value.trim().to_lowercase())
        .filter(|value| !value.is_empty())
    else {
        return Ok(());
    };
    validate_engine(path, &engine)?;
    config.summarizer_engine = engine;
    Ok(())
}

fn validate_base_url(path: &Path, base_url: &str) -> Result<(), ConfigError> {
    let trimmed = base_url.trim();
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "kagi.base_url",
        message: format!("Use an http:// or https:// URL: {base_url}"),
    })
}

fn validate_timeout(path: &Path, timeout_secs: u64) -> Result<(), ConfigError> {
    if (1..=300).contains(&timeout_secs) {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "kagi.timeout_secs",
        message: "Specify a value between 1 and 300 seconds".into(),
    })
}

fn validate_engine(path: &Path, engine: &str) -> Result<(), ConfigError> {
    if SUMMARIZER_ENGINES.contains(&engine) {
        return Ok(());
    }
    Err(ConfigError::InvalidField {
        path: path.to_path_buf(),
        field: "kagi.summarizer_engine",
        message: format!(
            "Unknown engine `{engine}`; expected one of {}",
            SUMMARIZER_ENGINES.join(", ")
        ),
    })
}
