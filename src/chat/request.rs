use schemars::schema_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::message::Message;
use super::tool::{ToolChoiceType, ToolDefinition};
use crate::core::error::LlmError;

/// Schema name used when constraining output to a JSON schema.
pub const RESPONSE_JSON_SCHEMA_NAME: &str = "responseJsonSchema";

/// Sampling parameters shared by every chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub random_seed: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub safe_prompt: bool,

    /// Number of choices to generate. Only the first one is surfaced by
    /// the generation helpers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<u32>,

    #[serde(default = "parallel_tool_calls_default")]
    pub parallel_tool_calls: bool,

    /// Requested streaming. Always sent as `false`.
    #[serde(default)]
    pub stream: bool,
}

fn parallel_tool_calls_default() -> bool {
    true
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            temperature: None,
            top_p: None,
            max_tokens: None,
            stop: Vec::new(),
            random_seed: None,
            frequency_penalty: None,
            presence_penalty: None,
            safe_prompt: false,
            n: None,
            parallel_tool_calls: true,
            stream: false,
        }
    }
}

impl CompletionConfig {
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_stop(mut self, stop: Vec<String>) -> Self {
        self.stop = stop;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn with_safe_prompt(mut self, safe_prompt: bool) -> Self {
        self.safe_prompt = safe_prompt;
        self
    }

    pub fn with_n(mut self, n: u32) -> Self {
        self.n = Some(n);
        self
    }

    pub fn with_parallel_tool_calls(mut self, parallel: bool) -> Self {
        self.parallel_tool_calls = parallel;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatType {
    Text,
    JsonObject,
    JsonSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: Value,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub r#type: ResponseFormatType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<JsonSchema>,
}

impl ResponseFormat {
    pub fn text() -> Self {
        Self {
            r#type: ResponseFormatType::Text,
            json_schema: None,
        }
    }

    pub fn json_object() -> Self {
        Self {
            r#type: ResponseFormatType::JsonObject,
            json_schema: None,
        }
    }

    /// Strict JSON-schema output under the fixed schema name.
    pub fn json_schema(schema: Value) -> Self {
        Self {
            r#type: ResponseFormatType::JsonSchema,
            json_schema: Some(JsonSchema {
                name: RESPONSE_JSON_SCHEMA_NAME.to_string(),
                description: None,
                schema,
                strict: true,
            }),
        }
    }

    /// Like [`ResponseFormat::json_schema`], with the schema derived from `T`.
    pub fn json_schema_for<T: schemars::JsonSchema>() -> Result<Self, LlmError> {
        let schema = serde_json::to_value(schema_for!(T))
            .map_err(|e| LlmError::parse("Failed to serialize JSON schema", e))?;
        Ok(Self::json_schema(schema))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,

    #[serde(flatten)]
    pub config: CompletionConfig,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<ToolChoiceType>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            config: CompletionConfig::default(),
            response_format: None,
            tools: None,
            tool_choice: None,
        }
    }

    pub fn with_config(mut self, config: CompletionConfig) -> Self {
        self.config = config;
        self.config.stream = false;
        self
    }

    /// Attach tools. An empty list clears both tools and tool choice.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        if tools.is_empty() {
            self.tools = None;
            self.tool_choice = None;
        } else {
            self.tools = Some(tools);
            self.tool_choice.get_or_insert(ToolChoiceType::Auto);
        }
        self
    }

    pub fn with_tool_choice(mut self, tool_choice: ToolChoiceType) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }

    pub fn with_response_format(mut self, response_format: ResponseFormat) -> Self {
        self.response_format = Some(response_format);
        self
    }

    pub fn has_tools(&self) -> bool {
        self.tools.as_ref().is_some_and(|tools| !tools.is_empty())
    }

    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model.is_empty() {
            return Err(LlmError::EmptyModel);
        }
        if self.messages.is_empty() {
            return Err(LlmError::EmptyMessages);
        }
        Ok(())
    }

    /// Final shape sent on the wire: streaming off, and tool choice only
    /// alongside a non-empty tool list.
    pub(crate) fn normalize(&mut self) {
        self.config.stream = false;
        if !self.has_tools() {
            self.tools = None;
            self.tool_choice = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(schemars::JsonSchema, serde::Deserialize)]
    #[allow(dead_code)]
    struct Weather {
        city: String,
        celsius: f64,
    }

    #[test]
    fn test_default_config_wire_fields() {
        let request = ChatCompletionRequest::new("x-small", vec![Message::user("hi")]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "x-small",
                "messages": [{"role": "user", "content": "hi"}],
                "parallel_tool_calls": true,
                "stream": false
            })
        );
    }

    #[test]
    fn test_sampling_fields_use_snake_case() {
        let config = CompletionConfig::default()
            .with_temperature(0.5)
            .with_top_p(0.9)
            .with_max_tokens(64)
            .with_stop(vec!["END".to_string()])
            .with_random_seed(7)
            .with_safe_prompt(true)
            .with_n(2);
        let request =
            ChatCompletionRequest::new("m", vec![Message::user("hi")]).with_config(config);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["temperature"], json!(0.5));
        assert_eq!(body["top_p"], json!(0.9));
        assert_eq!(body["max_tokens"], json!(64));
        assert_eq!(body["stop"], json!(["END"]));
        assert_eq!(body["random_seed"], json!(7));
        assert_eq!(body["safe_prompt"], json!(true));
        assert_eq!(body["n"], json!(2));
    }

    #[test]
    fn test_stream_is_forced_off() {
        let config = CompletionConfig {
            stream: true,
            ..CompletionConfig::default()
        };
        let mut request =
            ChatCompletionRequest::new("m", vec![Message::user("hi")]).with_config(config);
        assert!(!request.config.stream);

        request.config.stream = true;
        request.normalize();
        assert_eq!(serde_json::to_value(&request).unwrap()["stream"], json!(false));
    }

    #[test]
    fn test_tool_choice_dropped_without_tools() {
        let mut request = ChatCompletionRequest::new("m", vec![Message::user("hi")])
            .with_tool_choice(ToolChoiceType::Any);
        request.normalize();
        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("tool_choice").is_none());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_with_tools_defaults_choice_to_auto() {
        let tool = ToolDefinition::function("f", "d", &json!({"type": "object"}));
        let request = ChatCompletionRequest::new("m", vec![Message::user("hi")]).with_tools(vec![tool]);
        assert_eq!(request.tool_choice, Some(ToolChoiceType::Auto));

        let request = request.with_tools(vec![]);
        assert_eq!(request.tools, None);
        assert_eq!(request.tool_choice, None);
    }

    #[test]
    fn test_validate_reports_distinct_conditions() {
        assert!(matches!(
            ChatCompletionRequest::new("", vec![Message::user("hi")]).validate(),
            Err(LlmError::EmptyModel)
        ));
        assert!(matches!(
            ChatCompletionRequest::new("m", vec![]).validate(),
            Err(LlmError::EmptyMessages)
        ));
    }

    #[test]
    fn test_json_schema_response_format() {
        let format = ResponseFormat::json_schema(json!({"type": "object"}));
        assert_eq!(
            serde_json::to_value(&format).unwrap(),
            json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "responseJsonSchema",
                    "schema": {"type": "object"},
                    "strict": true
                }
            })
        );
        assert_eq!(
            serde_json::to_value(ResponseFormat::text()).unwrap(),
            json!({"type": "text"})
        );
    }

    #[test]
    fn test_json_schema_for_derives_from_type() {
        let format = ResponseFormat::json_schema_for::<Weather>().unwrap();
        let schema = &format.json_schema.unwrap().schema;
        assert_eq!(schema["type"], json!("object"));
        assert!(schema["properties"].get("city").is_some());
        assert!(schema["properties"].get("celsius").is_some());
    }
}
