use std::path::Path;

use tracing::{debug, info};

use super::{ServerConfig, CONFIG_ENV_KEY, DEFAULT_CONFIG_PATH};

pub fn log_source(path: Option<&Path>) {
    match path {
        Some(path) => info!(
            target: "kagi_mcp::config",
            path = %path.display(),
            "Loading configuration file"
        ),
        None => debug!(
            target: "kagi_mcp::config",
            env = CONFIG_ENV_KEY,
            default = DEFAULT_CONFIG_PATH,
            "No configuration file found; using built-in defaults"
        ),
    }
}

pub fn log_loaded(config: &ServerConfig) {
    info!(
        target: "kagi_mcp::config",
        path = %config.source_label(),
        base_url = %config.kagi.base_url,
        timeout_secs = config.kagi.timeout_secs,
        summarizer_engine = %config.kagi.summarizer_engine,
        api_key_in_file = config.kagi.api_key.is_some(),
        "Configuration loaded successfully"
    );
}
