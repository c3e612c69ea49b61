use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::content::Content;
use super::tool::ToolCall;
use crate::core::error::LlmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    #[serde(alias = "model")]
    Assistant,
    Tool,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }

    /// Strict decode. `model` is accepted as a synonym for `assistant`.
    pub fn decode(role: &str) -> Result<Self, LlmError> {
        match role {
            "system" => Ok(Role::System),
            "user" => Ok(Role::User),
            "assistant" | "model" => Ok(Role::Assistant),
            "tool" => Ok(Role::Tool),
            other => Err(LlmError::InvalidRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::decode(s)
    }
}

/// Lenient encode: known roles are normalized, anything else is sent as-is.
pub fn encode_role(role: &str) -> String {
    match Role::decode(role) {
        Ok(role) => role.as_str().to_string(),
        Err(_) => role.to_string(),
    }
}

/// A chat message, tagged by `role` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    System {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Content>,
    },
    User {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Content>,
    },
    #[serde(alias = "model")]
    Assistant {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Content>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<ToolCall>>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        prefix: bool,
    },
    Tool {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content: Option<Content>,
        #[serde(default)]
        name: String,
        #[serde(default)]
        tool_call_id: String,
    },
}

impl Message {
    pub fn system(content: impl Into<Content>) -> Self {
        Message::System {
            content: Some(content.into()),
        }
    }

    pub fn user(content: impl Into<Content>) -> Self {
        Message::User {
            content: Some(content.into()),
        }
    }

    pub fn assistant(content: impl Into<Content>) -> Self {
        Message::Assistant {
            content: Some(content.into()),
            tool_calls: None,
            prefix: false,
        }
    }

    pub fn assistant_tool_calls(content: Option<Content>, tool_calls: Vec<ToolCall>) -> Self {
        Message::Assistant {
            content,
            tool_calls: Some(tool_calls),
            prefix: false,
        }
    }

    pub fn tool(
        name: impl Into<String>,
        tool_call_id: impl Into<String>,
        content: impl Into<Content>,
    ) -> Self {
        Message::Tool {
            content: Some(content.into()),
            name: name.into(),
            tool_call_id: tool_call_id.into(),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Message::System { .. } => Role::System,
            Message::User { .. } => Role::User,
            Message::Assistant { .. } => Role::Assistant,
            Message::Tool { .. } => Role::Tool,
        }
    }

    pub fn content(&self) -> Option<&Content> {
        match self {
            Message::System { content }
            | Message::User { content }
            | Message::Assistant { content, .. }
            | Message::Tool { content, .. } => content.as_ref(),
        }
    }

    pub fn tool_calls(&self) -> &[ToolCall] {
        match self {
            Message::Assistant {
                tool_calls: Some(calls),
                ..
            } => calls,
            _ => &[],
        }
    }

    /// Build a message from a role name and a raw JSON payload.
    ///
    /// The payload may omit `role`; when present it must agree with `role`.
    /// Fields that belong to another role are rejected.
    pub fn from_role_and_payload(role: &str, payload: Value) -> Result<Self, LlmError> {
        let role = Role::decode(role)?;
        let mut fields = match payload {
            Value::Object(fields) => fields,
            Value::Null => Map::new(),
            other => {
                return Err(LlmError::InvalidRole(format!(
                    "{role} payload must be an object, got {other}"
                )));
            }
        };

        if let Some(declared) = fields.get("role") {
            let declared = declared
                .as_str()
                .ok_or_else(|| LlmError::InvalidRole(declared.to_string()))?;
            if Role::decode(declared)? != role {
                return Err(LlmError::InvalidRole(format!(
                    "payload role '{declared}' does not match '{role}'"
                )));
            }
        }

        fields.insert("role".to_string(), Value::String(role.as_str().to_string()));
        Self::from_value(Value::Object(fields))
    }

    /// Strict decode from JSON, with structured errors for bad roles,
    /// fields that belong to another role and unknown content chunks.
    pub fn from_value(value: Value) -> Result<Self, LlmError> {
        let role = match value.get("role") {
            Some(Value::String(role)) => Role::decode(role)?,
            Some(other) => return Err(LlmError::InvalidRole(other.to_string())),
            None => return Err(LlmError::InvalidRole("<missing>".to_string())),
        };

        let foreign: &[&str] = match role {
            Role::System | Role::User => &["tool_calls", "prefix", "name", "tool_call_id"],
            Role::Assistant => &["name", "tool_call_id"],
            Role::Tool => &["tool_calls", "prefix"],
        };
        if let Some(field) = foreign
            .iter()
            .find(|field| value.get(**field).is_some_and(|v| !v.is_null()))
        {
            return Err(LlmError::InvalidRole(format!(
                "{role} message cannot carry '{field}'"
            )));
        }

        if let Some(content) = value.get("content") {
            Content::from_value(content)?;
        }

        serde_json::from_value(value).map_err(|e| LlmError::parse("invalid message payload", e))
    }
}
