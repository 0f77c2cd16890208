//! `kagi_search_fetch`: web search over one or more queries.
use std::sync::Arc;

use rmcp::{
    handler::server::common::cached_schema_for_type,
    model::{CallToolResult, JsonObject},
};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use super::ToolDescriptor;
use crate::{lib::errors::ProviderError, provider::KagiProvider};

pub const SEARCH_TOOL_ID: &str = "kagi_search_fetch";

pub const SEARCH_TOOL: ToolDescriptor = ToolDescriptor {
    name: SEARCH_TOOL_ID,
    title: "Kagi Search",
    description: "Fetch web results based on one or more queries using the Kagi Search API. Use for general search and when the user explicitly tells you to 'fetch' results/information. Results are from all queries given. They are numbered continuously, so that a user may be able to refer to a result by a specific number.",
    input_schema: search_input_schema,
};

/// Input for `kagi_search_fetch`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchFetchArgs {
    /// One or more concise, keyword-focused search queries. Include essential context within each query for standalone use. A single query may also be sent as a plain string under `query`.
    #[serde(alias = "query", deserialize_with = "one_or_many")]
    #[schemars(with = "Vec<String>")]
    pub queries: Vec<String>,
    /// Maximum number of results per query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl SearchFetchArgs {
    pub fn single(query: impl Into<String>) -> Self {
        Self {
            queries: vec![query.into()],
            limit: None,
        }
    }
}

fn search_input_schema() -> Arc<JsonObject> {
    cached_schema_for_type::<SearchFetchArgs>()
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(query) => vec![query],
        OneOrMany::Many(queries) => queries,
    })
}

/// Forward a search call to the provider. The result and any failure pass through untouched.
pub async fn search_fetch(
    provider: &dyn KagiProvider,
    args: SearchFetchArgs,
) -> Result<CallToolResult, ProviderError> {
    provider.search_fetch(args).await
}
