//! Provider-neutral generation types.
//!
//! Framework adapters map their own message representation onto these; the
//! conversions to and from the wire model live in [`crate::chat::assembly`].

use std::time::Duration;

use serde_json::Value;

use crate::chat::{CompletionConfig, encode_role};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Model,
    Tool,
    Other(String),
}

impl ChatRole {
    /// Role name as sent on the wire. Unknown roles pass through unchanged.
    pub fn wire_name(&self) -> String {
        match self {
            ChatRole::System => encode_role("system"),
            ChatRole::User => encode_role("user"),
            ChatRole::Model => encode_role("model"),
            ChatRole::Tool => encode_role("tool"),
            ChatRole::Other(role) => encode_role(role),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolRequest {
    pub name: String,
    /// Correlation id assigned by the provider.
    pub reference: Option<String>,
    pub input: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolResponse {
    pub name: String,
    pub reference: Option<String>,
    pub output: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    /// Media referenced by URL, data URI or provider file token.
    Media {
        content_type: String,
        url: String,
    },
    ToolRequest(ToolRequest),
    ToolResponse(ToolResponse),
    Reasoning(String),
    /// A wire chunk with no neutral counterpart, kept in its JSON form.
    Custom(Value),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn media(content_type: impl Into<String>, url: impl Into<String>) -> Self {
        Part::Media {
            content_type: content_type.into(),
            url: url.into(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Part::Text(_))
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Part::Media { content_type, .. } if content_type.starts_with("image/"))
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Part::Media { content_type, .. } if content_type.starts_with("audio/"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: Vec<Part>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: Vec<Part>) -> Self {
        Self { role, content }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(ChatRole::System, vec![Part::text(text)])
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ChatRole::User, vec![Part::text(text)])
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::new(ChatRole::Model, vec![Part::text(text)])
    }

    /// Concatenation of all text parts.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                Part::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn tool_requests(&self) -> impl Iterator<Item = &ToolRequest> {
        self.content.iter().filter_map(|part| match part {
            Part::ToolRequest(request) => Some(request),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    pub name: String,
    pub description: Option<String>,
    /// JSON schema of the tool input
    pub parameters: Value,
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolChoice {
    #[default]
    Auto,
    Required,
    None,
}

impl From<&str> for ToolChoice {
    /// Unrecognized values fall back to `Auto`.
    fn from(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "required" => ToolChoice::Required,
            "none" => ToolChoice::None,
            _ => ToolChoice::Auto,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// What shape the caller expects the model output to take.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Ask the provider to enforce `schema`.
    pub constrained: bool,
    pub schema: Option<Value>,
}

impl OutputConfig {
    pub fn json_schema(schema: Value) -> Self {
        Self {
            format: OutputFormat::Json,
            constrained: true,
            schema: Some(schema),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<Tool>,
    pub tool_choice: Option<ToolChoice>,
    pub output: Option<OutputConfig>,
    pub config: Option<CompletionConfig>,
}

impl GenerateRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = Some(config);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Stop,
    Length,
    Interrupted,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LanguageModelUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseMetadata {
    pub model: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateResponse {
    /// `None` when the provider returned no choices.
    pub message: Option<ChatMessage>,
    pub finish_reason: StopReason,
    pub usage: LanguageModelUsage,
    pub latency: Duration,
    pub metadata: ResponseMetadata,
}

impl GenerateResponse {
    pub fn text(&self) -> String {
        self.message
            .as_ref()
            .map(ChatMessage::text)
            .unwrap_or_default()
    }
}
