//! HTTP client for the Kagi API.

use std::time::Duration;

use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{Response, StatusCode};
use rmcp::model::{CallToolResult, Content};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    format::{format_search_results, QueryResults},
    types::{api_error_message, SearchResponse, SummarizeResponse},
    KagiProvider,
};
use crate::{
    lib::errors::ProviderError,
    tools::{SearchFetchArgs, SummarizerArgs},
};

pub const DEFAULT_BASE_URL: &str = "https://kagi.com/api/v0";
pub const USER_AGENT: &str = concat!("kagi-mcp/", env!("CARGO_PKG_VERSION"));

/// Settings the client is built from.
#[derive(Debug, Clone)]
pub struct KagiClientSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub summarizer_engine: String,
    pub timeout: Duration,
}

/// [`KagiProvider`] backed by the Kagi HTTP API.
#[derive(Debug, Clone)]
pub struct KagiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    summarizer_engine: String,
}

impl KagiClient {
    pub fn new(settings: KagiClientSettings) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(settings.timeout)
            .build()?;
        Ok(Self {
            http,
            api_key: settings.api_key,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            summarizer_engine: settings.summarizer_engine,
        })
    }

    fn authorization(&self) -> Result<String, ProviderError> {
        self.api_key
            .as_deref()
            .map(|key| format!("Bot {key}"))
            .ok_or(ProviderError::MissingCredentials)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let authorization = self.authorization()?;
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(
            target: "kagi_mcp::provider",
            endpoint,
            "Sending Kagi API request"
        );
        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .query(params)
            .send()
            .await?;
        decode_response(response).await
    }

    async fn search_one(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> Result<QueryResults, ProviderError> {
        let mut params = vec![("q", query.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        let body: SearchResponse = self.get("search", &params).await?;
        if let Some(message) = api_error_message(body.error.as_deref()) {
            return Err(ProviderError::Api {
                status: StatusCode::OK.as_u16(),
                message,
            });
        }
        Ok(QueryResults {
            query: query.to_string(),
            items: body.data.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl KagiProvider for KagiClient {
    async fn search_fetch(&self, args: SearchFetchArgs) -> Result<CallToolResult, ProviderError> {
        if args.queries.is_empty() {
            return Err(ProviderError::InvalidRequest {
                message: "Search called with no queries".into(),
            });
        }
        if let Some(blank) = args.queries.iter().position(|q| q.trim().is_empty()) {
            return Err(ProviderError::InvalidRequest {
                message: format!("Query at index {blank} is empty"),
            });
        }

        let results =
            try_join_all(args.queries.iter().map(|query| self.search_one(query, args.limit)))
                .await?;
        Ok(CallToolResult::success(vec![Content::text(
            format_search_results(&results),
        )]))
    }

    async fn summarize(&self, args: SummarizerArgs) -> Result<CallToolResult, ProviderError> {
        if args.url.trim().is_empty() {
            return Err(ProviderError::InvalidRequest {
                message: "Summarizer called without a url".into(),
            });
        }

        let mut params = vec![
            ("url", args.url.clone()),
            ("engine", self.summarizer_engine.clone()),
            ("summary_type", args.summary_type.as_str().to_string()),
        ];
        if let Some(language) = &args.target_language {
            params.push(("target_language", language.clone()));
        }

        let body: SummarizeResponse = self.get("summarize", &params).await?;
        if let Some(message) = api_error_message(body.error.as_deref()) {
            return Err(ProviderError::Api {
                status: StatusCode::OK.as_u16(),
                message,
            });
        }
        let summary = body.data.ok_or_else(|| ProviderError::Decode {
            message: "response has no `data` field".into(),
        })?;
        Ok(CallToolResult::success(vec![Content::text(summary.output)]))
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ProviderError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        let message = serde_json::from_slice::<SearchResponse>(&bytes)
            .ok()
            .and_then(|body| api_error_message(body.error.as_deref()))
            .unwrap_or_else(|| {
                let text = String::from_utf8_lossy(&bytes).trim().to_string();
                if text.is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_string()
                } else {
                    text
                }
            });
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_slice(&bytes).map_err(|err| ProviderError::Decode {
        message: err.to_string(),
    })
}
