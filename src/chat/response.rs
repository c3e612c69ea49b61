use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::Content;
use super::message::Message;
use super::tool::ToolCall;
use crate::core::error::LlmError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ModelLength,
    Error,
    ToolCalls,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UsageInfo {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionChoice {
    #[serde(default)]
    pub index: u32,
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    /// Unix timestamp in seconds.
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: UsageInfo,
    /// Wall time of the whole call, retries and backoff included.
    #[serde(skip)]
    pub latency: Duration,
}

impl ChatCompletionResponse {
    /// Decode a response body, reporting bad roles and unknown content chunks
    /// in choice messages as [`LlmError::InvalidRole`] and
    /// [`LlmError::UnrecognizedContentChunk`].
    pub fn from_value(value: Value) -> Result<Self, LlmError> {
        if let Some(choices) = value.get("choices").and_then(Value::as_array) {
            for message in choices.iter().filter_map(|choice| choice.get("message")) {
                Message::from_value(message.clone())?;
            }
        }

        serde_json::from_value(value)
            .map_err(|e| LlmError::parse("Failed to parse chat completion response", e))
    }

    pub fn first_choice(&self) -> Option<&ChatCompletionChoice> {
        self.choices.first()
    }

    pub fn assistant_message(&self) -> Option<&Message> {
        self.first_choice().map(|choice| &choice.message)
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        self.assistant_message()
            .map(Message::tool_calls)
            .unwrap_or_default()
    }

    /// Text of the first choice; empty when there is none.
    pub fn text(&self) -> Result<String, LlmError> {
        match self.assistant_message().and_then(Message::content) {
            Some(content) => content.flatten_to_text(),
            None => Ok(String::new()),
        }
    }

    pub fn content(&self) -> Option<&Content> {
        self.assistant_message().and_then(Message::content)
    }
}
