//! MCP tools registered on the server and helper functions for the router.

pub mod search;
pub mod summarizer;

use std::sync::Arc;

use rmcp::{
    handler::server::router::tool::ToolRouter,
    model::{ErrorData, JsonObject, Tool, ToolAnnotations},
};
use serde_json::{json, Value};

use crate::lib::errors::ProviderError;

pub use search::{search_fetch, SearchFetchArgs, SEARCH_TOOL, SEARCH_TOOL_ID};
pub use summarizer::{summarize, SummarizerArgs, SummaryType, SUMMARIZER_TOOL, SUMMARIZER_TOOL_ID};

pub type ServerToolRouter<S> = ToolRouter<S>;

/// Static declaration of a tool exposed by the server.
#[derive(Debug, Clone, Copy)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: fn() -> Arc<JsonObject>,
}

impl ToolDescriptor {
    /// JSON view used by the `tools` CLI command.
    pub fn to_json(&self) -> Value {
        json!({
            "name": self.name,
            "title": self.title,
            "description": self.description,
            "inputSchema": Value::Object((*(self.input_schema)()).clone()),
        })
    }

    /// Overwrite the metadata of a registered route with this descriptor.
    pub fn apply(&self, tool: &mut Tool) {
        tool.title = Some(self.title.to_string());
        tool.description = Some(self.description.into());
        tool.input_schema = (self.input_schema)();
        tool.annotations
            .get_or_insert_with(ToolAnnotations::default)
            .title = Some(self.title.to_string());
    }
}

/// Every tool registered by the server, in registration order.
pub const TOOL_DESCRIPTORS: [ToolDescriptor; 2] = [SEARCH_TOOL, SUMMARIZER_TOOL];

/// Build the router and pair every generated route with its descriptor.
pub fn build_router<S>(builder: impl FnOnce() -> ServerToolRouter<S>) -> ServerToolRouter<S>
where
    S: Send + Sync + 'static,
{
    let mut router = builder();
    for descriptor in TOOL_DESCRIPTORS {
        if let Some(route) = router.map.get_mut(descriptor.name) {
            descriptor.apply(&mut route.attr);
        }
    }
    router
}

/// Map a provider failure onto the per-request MCP error channel.
///
/// The message is the provider's own; `data` adds a stable code for clients.
pub fn provider_error_to_error_data(tool: &'static str, err: &ProviderError) -> ErrorData {
    let descriptor = err.descriptor();
    let mut builder = descriptor
        .builder()
        .message(err.to_string())
        .retryable(err.is_retryable())
        .with_context_field("tool", json!(tool));
    if let Some(details) = err.details() {
        builder = builder.details(details);
    }
    builder.build().unwrap_or_else(|build_err| {
        ErrorData::internal_error(
            err.to_string(),
            Some(json!({
                "code": descriptor.code,
                "builder_error": build_err.to_string(),
            })),
        )
    })
}
