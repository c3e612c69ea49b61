use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::transport::TransportError;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("model name is empty")]
    EmptyModel,

    #[error("message list is empty")]
    EmptyMessages,

    #[error("invalid role: {0}")]
    InvalidRole(String),

    #[error("unrecognized content chunk type: {0}")]
    UnrecognizedContentChunk(String),

    #[error("unexpected non-text content chunk: {0}")]
    NonTextContent(String),

    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    #[error("request cancelled")]
    Cancelled,

    #[error("{message}")]
    Network {
        message: String,
        #[source]
        source: TransportError,
    },

    /// The provider answered with a non-2xx status and a structured error payload.
    #[error("API error ({status_code}): {error}")]
    Provider {
        status_code: u16,
        #[source]
        error: ErrorResponse,
    },

    /// Non-2xx status whose body did not match the structured error shape.
    #[error("HTTP request failed with status {status_code} and body '{body}'")]
    Api { status_code: u16, body: String },

    #[error("{message}")]
    Parse {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl LlmError {
    pub(crate) fn parse(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        LlmError::Parse {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// HTTP status attached to protocol errors.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Provider { status_code, .. } | LlmError::Api { status_code, .. } => {
                Some(*status_code)
            }
            _ => None,
        }
    }

    /// The structured provider payload, when the failure carried one.
    pub fn error_response(&self) -> Option<&ErrorResponse> {
        match self {
            LlmError::Provider { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Whether the underlying transport failure is classified as transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Network { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}

/// One validation entry of a provider error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "type", default)]
    pub r#type: String,

    /// Path to the offending field, e.g. `["body", "messages"]`.
    #[serde(default, deserialize_with = "deserialize_loc")]
    pub loc: Vec<String>,

    #[serde(default)]
    pub msg: String,

    #[serde(default)]
    pub input: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(default)]
    pub detail: Vec<ErrorDetail>,
}

/// Error payload returned by the API on validation and request failures.
///
/// `type` and `message` are required so that unrelated JSON bodies such as
/// `{"error": "..."}` are not mistaken for a structured error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub object: String,

    #[serde(rename = "type")]
    pub r#type: String,

    pub message: ErrorMessage,

    #[serde(default)]
    pub param: Value,

    #[serde(default)]
    pub code: Value,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.r#type)?;

        if self.message.detail.is_empty() {
            return Ok(());
        }

        f.write_str(":")?;
        for detail in &self.message.detail {
            write!(f, " {}: {}", detail.r#type, detail.msg)?;
            if !detail.loc.is_empty() {
                write!(f, " ({})", detail.loc.join("."))?;
            }
            f.write_str(";")?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorResponse {}

// Location entries are strings for fields and integers for list indices.
fn deserialize_loc<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|segment| match segment {
            Value::String(s) => s,
            other => other.to_string(),
        })
        .collect())
}
