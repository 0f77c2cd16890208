//! `kagi_summarizer`: summarize a document by URL.
use std::sync::Arc;

use rmcp::{
    handler::server::common::cached_schema_for_type,
    model::{CallToolResult, JsonObject},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ToolDescriptor;
use crate::{lib::errors::ProviderError, provider::KagiProvider};

pub const SUMMARIZER_TOOL_ID: &str = "kagi_summarizer";

pub const SUMMARIZER_TOOL: ToolDescriptor = ToolDescriptor {
    name: SUMMARIZER_TOOL_ID,
    title: "Kagi Summarizer",
    description: "Summarize content from a URL using the Kagi Summarizer API. The Summarizer can summarize any document type (text webpage, video, audio, etc.)",
    input_schema: summarizer_input_schema,
};

/// Shape of the produced summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    /// Paragraph prose.
    #[default]
    Summary,
    /// Bulleted list of key points.
    Takeaway,
}

impl SummaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::Summary => "summary",
            SummaryType::Takeaway => "takeaway",
        }
    }
}

/// Input for `kagi_summarizer`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SummarizerArgs {
    /// A URL to a document to summarize.
    pub url: String,
    /// Type of summary to produce. Options are 'summary' for paragraph prose and 'takeaway' for a bulleted list of key points.
    #[serde(default)]
    pub summary_type: SummaryType,
    /// Desired output language using language codes (e.g., 'EN' for English). If not specified, the document's original language influences the output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

impl SummarizerArgs {
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            summary_type: SummaryType::default(),
            target_language: None,
        }
    }
}

fn summarizer_input_schema() -> Arc<JsonObject> {
    cached_schema_for_type::<SummarizerArgs>()
}

/// Forward a summarize call to the provider. The result and any failure pass through untouched.
pub async fn summarize(
    provider: &dyn KagiProvider,
    args: SummarizerArgs,
) -> Result<CallToolResult, ProviderError> {
    provider.summarize(args).await
}
