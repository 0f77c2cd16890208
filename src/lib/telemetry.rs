//! Telemetry initialization and tool call span helpers.

use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, warn, Span};
use tracing_subscriber::{fmt, EnvFilter};
use uuid::Uuid;

/// Initialize `tracing` and format developer logs.
///
/// Logs always go to stderr; stdout carries the MCP protocol.
pub fn init_tracing() -> Result<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize tracing: {err}"))
}

/// Span helper to record start and finish of a single tool call.
pub struct ToolCallSpan {
    span: Span,
    started_at: Instant,
    call_id: Uuid,
    tool: &'static str,
}

impl ToolCallSpan {
    /// Start a call span.
    pub fn start(tool: &'static str) -> Self {
        let call_id = Uuid::new_v4();
        let span = info_span!(
            target: "kagi_mcp::tools",
            "tool_call",
            %call_id,
            tool
        );
        Self {
            span,
            started_at: Instant::now(),
            call_id,
            tool,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Close the span while recording status and elapsed time.
    pub fn finish(self, error: Option<&dyn std::error::Error>) {
        let elapsed_ms = self.started_at.elapsed().as_millis();
        let _entered = self.span.enter();
        match error {
            None => info!(
                target: "kagi_mcp::tools",
                call_id = %self.call_id,
                tool = self.tool,
                status = "succeeded",
                elapsed_ms = elapsed_ms,
                "Completed tool call"
            ),
            Some(err) => warn!(
                target: "kagi_mcp::tools",
                call_id = %self.call_id,
                tool = self.tool,
                status = "failed",
                elapsed_ms = elapsed_ms,
                error = %err,
                "Tool call failed"
            ),
        }
    }
}

/// Payload for logging MCP runtime state as structured telemetry.
#[derive(Debug, Serialize)]
pub struct StartupTelemetry<'a> {
    pub config_path: Option<&'a str>,
    pub credential_source: &'a str,
    pub base_url: &'a str,
    pub summarizer_engine: &'a str,
    pub tools: &'a [&'static str],
    pub launch_args: &'a [String],
}

/// Emit the startup configuration to `tracing`.
pub fn emit_startup(telemetry: &StartupTelemetry<'_>) {
    info!(
        target: "kagi_mcp::runtime",
        transport = "stdio",
        config_path = telemetry.config_path.unwrap_or("<defaults>"),
        credential_source = telemetry.credential_source,
        base_url = telemetry.base_url,
        summarizer_engine = telemetry.summarizer_engine,
        tools = ?telemetry.tools,
        launch_args = ?telemetry.launch_args,
        "Starting MCP server"
    );
}
