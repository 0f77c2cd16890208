//! Kagi API response bodies.

use serde::Deserialize;

/// Entry of the `error` array Kagi returns on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub msg: String,
}

/// `GET /search` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Option<Vec<SearchItem>>,
    #[serde(default)]
    pub error: Option<Vec<ApiError>>,
}

/// One element of `data`. `t == 0` is a web result; `t == 1` is related searches.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub t: u8,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
}

impl SearchItem {
    pub fn is_web_result(&self) -> bool {
        self.t == 0
    }
}

/// `GET /summarize` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default)]
    pub data: Option<Summary>,
    #[serde(default)]
    pub error: Option<Vec<ApiError>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Summary {
    pub output: String,
}

/// Join the messages of a non-empty `error` array.
pub fn api_error_message(errors: Option<&[ApiError]>) -> Option<String> {
    let errors = errors.filter(|errors| !errors.is_empty())?;
    let message = errors
        .iter()
        .map(|err| match err.code {
            Some(code) => format!("{} (code {code})", err.msg),
            None => err.msg.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ");
    Some(message)
}
