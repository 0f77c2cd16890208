use std::sync::Arc;

use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler},
    model::{CallToolResult, ErrorData, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tracing::Instrument;

use crate::{
    lib::telemetry::ToolCallSpan,
    provider::KagiProvider,
    tools::{
        self, provider_error_to_error_data, SearchFetchArgs, ServerToolRouter, SummarizerArgs,
        SEARCH_TOOL_ID, SUMMARIZER_TOOL_ID,
    },
};

/// Identity reported to MCP clients during the handshake.
pub const SERVER_NAME: &str = "kagi-mcp";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct KagiServer {
    provider: Arc<dyn KagiProvider>,
    instructions: Arc<String>,
    tool_router: ServerToolRouter<Self>,
}

impl KagiServer {
    /// Register both tools against a fresh router. Nothing is bound yet.
    ///
    /// Names, titles, descriptions and input schemas come from
    /// [`tools::TOOL_DESCRIPTORS`].
    pub fn new(provider: Arc<dyn KagiProvider>, instructions: String) -> Self {
        let router = tools::build_router(Self::tool_router);
        Self {
            provider,
            instructions: Arc::new(instructions),
            tool_router: router,
        }
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect()
    }
}

#[tool_router(router = tool_router)]
impl KagiServer {
    #[tool(
        name = "kagi_search_fetch",
        annotations(read_only_hint = true, open_world_hint = true)
    )]
    async fn kagi_search_fetch(
        &self,
        Parameters(args): Parameters<SearchFetchArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let call = ToolCallSpan::start(SEARCH_TOOL_ID);
        let result = tools::search_fetch(self.provider.as_ref(), args)
            .instrument(call.span().clone())
            .await;
        call.finish(result.as_ref().err().map(|err| err as &dyn std::error::Error));
        result.map_err(|err| provider_error_to_error_data(SEARCH_TOOL_ID, &err))
    }

    #[tool(
        name = "kagi_summarizer",
        annotations(read_only_hint = true, open_world_hint = true)
    )]
    async fn kagi_summarizer(
        &self,
        Parameters(args): Parameters<SummarizerArgs>,
    ) -> Result<CallToolResult, ErrorData> {
        let call = ToolCallSpan::start(SUMMARIZER_TOOL_ID);
        let result = tools::summarize(self.provider.as_ref(), args)
            .instrument(call.span().clone())
            .await;
        call.finish(result.as_ref().err().map(|err| err as &dyn std::error::Error));
        result.map_err(|err| provider_error_to_error_data(SUMMARIZER_TOOL_ID, &err))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for KagiServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: SERVER_VERSION.into(),
                ..Implementation::from_build_env()
            },
            instructions: Some((*self.instructions).clone()),
            ..ServerInfo::default()
        }
    }
}
