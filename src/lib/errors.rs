use std::path::PathBuf;

use config::ConfigError as ConfigLoaderError;
use rmcp::model::{ErrorCode, ErrorData};
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicitly requested configuration file does not exist.
    #[error("Configuration file {path} does not exist")]
    NotFound { path: PathBuf },
    /// Failed to build (read) the configuration file.
    #[error("Failed to read configuration file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Failed to deserialize TOML into a struct.
    #[error("Failed to parse configuration file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ConfigLoaderError,
    },
    /// Field failed validation.
    #[error("Configuration file {path} has invalid `{field}`: {message}")]
    InvalidField {
        path: PathBuf,
        field: &'static str,
        message: String,
    },
}

impl ConfigError {
    /// Helper to wrap `config::ConfigError` as a read failure.
    pub fn from_read_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::FileRead { path, source }
    }

    /// Helper to wrap `config::ConfigError` as a parse failure.
    pub fn from_parse_error(path: PathBuf, source: ConfigLoaderError) -> Self {
        Self::Parse { path, source }
    }
}

/// Failures raised by the Kagi provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("No Kagi API key configured")]
    MissingCredentials,
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
    #[error("Request to Kagi failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("Kagi API returned an error (status={status}): {message}")]
    Api { status: u16, message: String },
    #[error("Failed to decode Kagi response: {message}")]
    Decode { message: String },
}

impl ProviderError {
    /// Descriptor used when this error crosses the protocol boundary.
    pub fn descriptor(&self) -> &'static ToolErrorDescriptor {
        match self {
            ProviderError::MissingCredentials => &KAGI_CREDENTIALS_REQUIRED_ERROR,
            ProviderError::InvalidRequest { .. } => &KAGI_INVALID_REQUEST_ERROR,
            ProviderError::Transport { .. } => &KAGI_REQUEST_FAILED_ERROR,
            ProviderError::Api { .. } => &KAGI_API_ERROR,
            ProviderError::Decode { .. } => &KAGI_RESPONSE_INVALID_ERROR,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Transport { .. } => true,
            ProviderError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Extra context for the `details` field of the error data.
    pub fn details(&self) -> Option<Value> {
        match self {
            ProviderError::Api { status, .. } => Some(json!({ "status": status })),
            ProviderError::Transport { source } => Some(json!({ "timeout": source.is_timeout() })),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(source: reqwest::Error) -> Self {
        ProviderError::Transport { source }
    }
}

/// Structured error metadata returned by MCP tools.
#[derive(Debug, Clone, Serialize)]
pub struct ToolErrorDescriptor {
    /// Error code.
    pub code: &'static str,
    /// Recommended remediation.
    pub remediation: &'static str,
    /// JSON-RPC error class.
    #[serde(skip)]
    pub rpc_code: ErrorCode,
}

impl ToolErrorDescriptor {
    pub const fn new(code: &'static str, remediation: &'static str, rpc_code: ErrorCode) -> Self {
        Self {
            code,
            remediation,
            rpc_code,
        }
    }

    /// Create a builder.
    pub fn builder(&self) -> ToolErrorDescriptorBuilder<'_> {
        ToolErrorDescriptorBuilder::new(self)
    }
}

/// Builder for error data that fails if required fields are missing.
pub struct ToolErrorDescriptorBuilder<'a> {
    descriptor: &'a ToolErrorDescriptor,
    message: Option<String>,
    retryable: Option<bool>,
    details: Option<Value>,
    extra_fields: Map<String, Value>,
}

impl<'a> ToolErrorDescriptorBuilder<'a> {
    pub fn new(descriptor: &'a ToolErrorDescriptor) -> Self {
        Self {
            descriptor,
            message: None,
            retryable: None,
            details: None,
            extra_fields: Map::new(),
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_context_field(mut self, key: &str, value: Value) -> Self {
        self.extra_fields.insert(key.to_string(), value);
        self
    }

    pub fn build(self) -> Result<ErrorData, ToolErrorBuilderError> {
        if self.descriptor.remediation.trim().is_empty() {
            return Err(ToolErrorBuilderError::MissingRemediation {
                code: self.descriptor.code,
            });
        }
        let message = self
            .message
            .filter(|message| !message.trim().is_empty())
            .ok_or(ToolErrorBuilderError::MissingMessage {
                code: self.descriptor.code,
            })?;
        let retryable = self
            .retryable
            .ok_or(ToolErrorBuilderError::MissingRetryable {
                code: self.descriptor.code,
            })?;

        let mut data = Map::new();
        data.insert("code".into(), Value::String(self.descriptor.code.into()));
        data.insert(
            "remediation".into(),
            Value::String(self.descriptor.remediation.into()),
        );
        data.insert("retryable".into(), Value::Bool(retryable));
        if let Some(details) = self.details {
            data.insert("details".into(), details);
        }
        for (key, value) in self.extra_fields {
            data.insert(key, value);
        }

        Ok(ErrorData::new(
            self.descriptor.rpc_code,
            message,
            Some(Value::Object(data)),
        ))
    }
}

/// Errors when required builder fields are missing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolErrorBuilderError {
    #[error("message is missing (code={code})")]
    MissingMessage { code: &'static str },
    #[error("retryable is missing (code={code})")]
    MissingRetryable { code: &'static str },
    #[error("remediation is empty (code={code})")]
    MissingRemediation { code: &'static str },
}

pub const KAGI_CREDENTIALS_REQUIRED_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "KAGI_CREDENTIALS_REQUIRED",
    "Set KAGI_API_KEY, pass --api-key, or add [kagi].api_key to config.toml, then restart the server.",
    ErrorCode::INVALID_REQUEST,
);

pub const KAGI_INVALID_REQUEST_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "KAGI_INVALID_REQUEST",
    "Fix the tool arguments before retrying.",
    ErrorCode::INVALID_PARAMS,
);

pub const KAGI_REQUEST_FAILED_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "KAGI_REQUEST_FAILED",
    "Check network connectivity to the Kagi API and retry.",
    ErrorCode::INTERNAL_ERROR,
);

pub const KAGI_API_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "KAGI_API_ERROR",
    "Inspect the Kagi error message; verify the API key and account balance.",
    ErrorCode::INTERNAL_ERROR,
);

pub const KAGI_RESPONSE_INVALID_ERROR: ToolErrorDescriptor = ToolErrorDescriptor::new(
    "KAGI_RESPONSE_INVALID",
    "The Kagi API response could not be understood; retry later or check base_url.",
    ErrorCode::INTERNAL_ERROR,
);
