use std::{process::ExitCode, sync::Arc};

use anyhow::Error;
use rmcp::{transport::IntoTransport, RoleServer, ServiceExt};
use tracing::{error, info, warn};

use crate::{
    cli::{resolve_api_key, CredentialSource, LaunchProfile},
    lib::telemetry::{emit_startup, StartupTelemetry},
    provider::{KagiClient, KagiClientSettings},
    server::{
        config::ServerConfig,
        runtime::{build_instructions, KagiServer},
    },
    tools::TOOL_DESCRIPTORS,
};

/// Bundles a runtime error message with an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    exit_code: ExitCode,
}

impl RuntimeExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: format!("{err:?}"),
            exit_code: ExitCode::FAILURE,
        }
    }

    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message);
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Build the provider and server from config, then serve over stdio.
pub async fn run_server(profile: LaunchProfile, config: ServerConfig) -> Result<(), RuntimeExit> {
    let (api_key, credential_source) = resolve_api_key(
        profile.api_key_override.as_deref(),
        config.kagi.api_key.as_deref(),
    );
    if credential_source == CredentialSource::Missing {
        warn!(
            target: "kagi_mcp::runtime",
            "No Kagi API key configured; tool calls will fail until one is provided"
        );
    }

    let client = KagiClient::new(KagiClientSettings {
        api_key,
        base_url: config.kagi.base_url.clone(),
        summarizer_engine: config.kagi.summarizer_engine.clone(),
        timeout: config.kagi.timeout(),
    })
    .map_err(RuntimeExit::from_error)?;

    let instructions = build_instructions(credential_source, &config);
    let server = KagiServer::new(Arc::new(client), instructions);

    let source_label = config.source_label();
    let tool_names: Vec<&'static str> = TOOL_DESCRIPTORS.iter().map(|tool| tool.name).collect();
    emit_startup(&StartupTelemetry {
        config_path: config.source_path.as_ref().map(|_| source_label.as_str()),
        credential_source: credential_source.as_str(),
        base_url: &config.kagi.base_url,
        summarizer_engine: &config.kagi.summarizer_engine,
        tools: &tool_names,
        launch_args: &profile.launch_args,
    });

    start(server).await
}

/// Bind the server to stdin/stdout and wait for the session to end.
pub async fn start(server: KagiServer) -> Result<(), RuntimeExit> {
    serve_transport(server, rmcp::transport::stdio()).await
}

/// Bind the server to `transport` and wait until the client goes away.
///
/// Returns only after the session ends. A failed bind or handshake is logged and
/// surfaces as a non-zero `RuntimeExit`; no running service exists in that case.
pub async fn serve_transport<T, E, A>(server: KagiServer, transport: T) -> Result<(), RuntimeExit>
where
    T: IntoTransport<RoleServer, E, A>,
    E: std::error::Error + Send + Sync + 'static,
{
    let running = server.serve(transport).await.map_err(|err| {
        error!(
            target: "kagi_mcp::runtime",
            error = %err,
            "Failed to start Kagi MCP server"
        );
        RuntimeExit::from_error(err)
    })?;
    info!(
        target: "kagi_mcp::runtime",
        transport = "stdio",
        "Kagi MCP server started successfully"
    );

    let reason = running.waiting().await.map_err(|err| {
        error!(
            target: "kagi_mcp::runtime",
            error = %err,
            "MCP service task failed"
        );
        RuntimeExit::from_error(err)
    })?;
    info!(
        target: "kagi_mcp::runtime",
        reason = ?reason,
        "Kagi MCP server stopped"
    );
    Ok(())
}
