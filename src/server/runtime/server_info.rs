use crate::{cli::CredentialSource, server::config::ServerConfig};

/// Build the `ServerInfo.instructions` string shown to MCP clients.
pub fn build_instructions(credential_source: CredentialSource, config: &ServerConfig) -> String {
    let credentials = match credential_source {
        CredentialSource::Missing => {
            "No Kagi API key is configured; tool calls will fail until KAGI_API_KEY is set."
                .to_string()
        }
        source => format!("Kagi API key loaded from {}.", source.as_str()),
    };
    format!(
        "Kagi search (kagi_search_fetch) and summarizer (kagi_summarizer, engine={engine}) tools. Config: {path}. {credentials}",
        engine = config.kagi.summarizer_engine,
        path = config.source_label(),
    )
}
