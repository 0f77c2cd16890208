//! Search and summarization provider.
//!
//! The server only ever talks to [`KagiProvider`]; [`KagiClient`] is the HTTP
//! implementation used in production, and tests substitute their own.

mod client;
mod format;
mod types;

use async_trait::async_trait;
use rmcp::model::CallToolResult;

use crate::{
    lib::errors::ProviderError,
    tools::{SearchFetchArgs, SummarizerArgs},
};

pub use client::{KagiClient, KagiClientSettings, DEFAULT_BASE_URL, USER_AGENT};
pub use format::{format_search_results, QueryResults};
pub use types::{SearchItem, SearchResponse, SummarizeResponse, Summary};

/// Capabilities the two tools delegate to.
#[async_trait]
pub trait KagiProvider: Send + Sync {
    /// Run every query and return the rendered results.
    async fn search_fetch(&self, args: SearchFetchArgs) -> Result<CallToolResult, ProviderError>;

    /// Summarize the document behind a URL.
    async fn summarize(&self, args: SummarizerArgs) -> Result<CallToolResult, ProviderError>;
}
