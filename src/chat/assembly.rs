//! Conversions between the provider-neutral types in [`crate::core::types`]
//! and the chat completion wire model.

use serde_json::Value;
use tracing::{debug, warn};

use super::content::{Content, ContentChunk};
use super::message::{Message, Role};
use super::request::{ChatCompletionRequest, ResponseFormat};
use super::response::{ChatCompletionResponse, FinishReason};
use super::tool::{ToolCall, ToolChoiceType, ToolDefinition};
use crate::core::error::LlmError;
use crate::core::types::{
    ChatMessage, ChatRole, GenerateRequest, GenerateResponse, LanguageModelUsage, OutputFormat,
    Part, ResponseMetadata, StopReason, Tool, ToolChoice, ToolRequest, ToolResponse,
};

/// Assemble the wire request for `model` from a neutral generation request.
pub fn build_chat_request(
    model: &str,
    request: &GenerateRequest,
) -> Result<ChatCompletionRequest, LlmError> {
    if model.is_empty() {
        return Err(LlmError::EmptyModel);
    }
    if request.messages.is_empty() {
        return Err(LlmError::EmptyMessages);
    }

    let mut messages = Vec::with_capacity(request.messages.len());
    for message in &request.messages {
        messages.extend(to_wire_messages(message)?);
    }

    let mut wire = ChatCompletionRequest::new(model, messages)
        .with_config(request.config.clone().unwrap_or_default());

    if !request.tools.is_empty() {
        wire = wire
            .with_tools(request.tools.iter().map(tool_definition).collect())
            .with_tool_choice(map_tool_choice(request.tool_choice.unwrap_or_default()));
    }

    let response_format = match &request.output {
        Some(output) if output.constrained && output.format == OutputFormat::Json => {
            let schema = output
                .schema
                .clone()
                .unwrap_or_else(|| Value::Object(Default::default()));
            ResponseFormat::json_schema(schema)
        }
        _ => ResponseFormat::text(),
    };

    Ok(wire.with_response_format(response_format))
}

fn tool_definition(tool: &Tool) -> ToolDefinition {
    ToolDefinition::function(
        tool.name.clone(),
        tool.description.clone().unwrap_or_default(),
        &tool.parameters,
    )
    .with_strict(tool.strict.unwrap_or(false))
}

pub fn map_tool_choice(choice: ToolChoice) -> ToolChoiceType {
    match choice {
        ToolChoice::Auto => ToolChoiceType::Auto,
        ToolChoice::Required => ToolChoiceType::Any,
        ToolChoice::None => ToolChoiceType::None,
    }
}

pub fn map_finish_reason(reason: Option<&FinishReason>) -> StopReason {
    match reason {
        Some(FinishReason::Stop) | Some(FinishReason::ToolCalls) => StopReason::Stop,
        Some(FinishReason::Length) | Some(FinishReason::ModelLength) => StopReason::Length,
        Some(FinishReason::Error) => StopReason::Interrupted,
        Some(FinishReason::Other(_)) | None => StopReason::Unknown,
    }
}

/// Convert the first choice of a wire response into a neutral response.
///
/// A response without choices is not an error: it yields usage and latency
/// with no message.
pub fn parse_chat_response(response: &ChatCompletionResponse) -> Result<GenerateResponse, LlmError> {
    let usage = LanguageModelUsage {
        prompt_tokens: response.usage.prompt_tokens,
        completion_tokens: response.usage.completion_tokens,
        total_tokens: response.usage.total_tokens,
    };
    let metadata = ResponseMetadata {
        model: response.model.clone(),
        id: response.id.clone(),
    };

    let Some(choice) = response.first_choice() else {
        return Ok(GenerateResponse {
            message: None,
            finish_reason: StopReason::Unknown,
            usage,
            latency: response.latency,
            metadata,
        });
    };

    if response.choices.len() > 1 {
        debug!(
            choices = response.choices.len(),
            "Only the first choice is returned"
        );
    }

    let mut message = from_wire_message(&choice.message)?;
    message.role = ChatRole::Model;

    Ok(GenerateResponse {
        message: Some(message),
        finish_reason: map_finish_reason(choice.finish_reason.as_ref()),
        usage,
        latency: response.latency,
        metadata,
    })
}

/// Join text parts with newlines, failing on any other part.
pub fn parts_to_text(parts: &[Part]) -> Result<String, LlmError> {
    let texts = parts
        .iter()
        .map(|part| match part {
            Part::Text(text) => Ok(text.as_str()),
            other => Err(LlmError::NonTextContent(part_kind(other).to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(texts.join("\n"))
}

fn part_kind(part: &Part) -> &'static str {
    match part {
        Part::Text(_) => "text",
        Part::Media { .. } => "media",
        Part::ToolRequest(_) => "tool_request",
        Part::ToolResponse(_) => "tool_response",
        Part::Reasoning(_) => "reasoning",
        Part::Custom(_) => "custom",
    }
}

/// Convert one neutral message into wire messages.
///
/// Tool messages expand to one wire message per tool response part.
pub fn to_wire_messages(message: &ChatMessage) -> Result<Vec<Message>, LlmError> {
    let role = Role::decode(&message.role.wire_name())?;

    let wire = match role {
        Role::System => vec![Message::system(parts_to_text(&message.content)?)],
        Role::User => vec![Message::User {
            content: Some(user_content(&message.content)?),
        }],
        Role::Assistant => vec![assistant_message(&message.content)?],
        Role::Tool => message
            .content
            .iter()
            .filter_map(|part| match part {
                Part::ToolResponse(response) => Some(tool_message(response)),
                _ => None,
            })
            .collect::<Result<Vec<_>, _>>()?,
    };

    Ok(wire)
}

fn user_content(parts: &[Part]) -> Result<Content, LlmError> {
    if parts.iter().all(Part::is_text) {
        return parts_to_text(parts).map(Content::Text);
    }
    content_chunks(parts).map(Content::Chunks)
}

fn assistant_message(parts: &[Part]) -> Result<Message, LlmError> {
    let tool_calls: Vec<ToolCall> = parts
        .iter()
        .filter_map(|part| match part {
            Part::ToolRequest(request) => Some(request),
            _ => None,
        })
        .enumerate()
        .map(|(index, request)| {
            ToolCall::new(
                request.reference.clone().unwrap_or_default(),
                index as u32,
                request.name.clone(),
                request.input.clone(),
            )
        })
        .collect();

    let body: Vec<Part> = parts
        .iter()
        .filter(|part| !matches!(part, Part::ToolRequest(_)))
        .cloned()
        .collect();

    let content = if body.is_empty() && !tool_calls.is_empty() {
        None
    } else if body.iter().all(Part::is_text) {
        Some(Content::Text(parts_to_text(&body)?))
    } else {
        Some(Content::Chunks(content_chunks(&body)?))
    };

    Ok(Message::Assistant {
        content,
        tool_calls: (!tool_calls.is_empty()).then_some(tool_calls),
        prefix: false,
    })
}

fn content_chunks(parts: &[Part]) -> Result<Vec<ContentChunk>, LlmError> {
    let mut chunks = Vec::with_capacity(parts.len());
    for part in parts {
        match part {
            Part::Text(text) => chunks.push(ContentChunk::text(text.clone())),
            Part::Media { content_type, url } if part.is_image() => {
                debug!(content_type = %content_type, "Mapping media part to image chunk");
                chunks.push(ContentChunk::image_url(url.clone()));
            }
            Part::Media { url, .. } if part.is_audio() => {
                chunks.push(ContentChunk::audio(url.clone()));
            }
            Part::Media { content_type, .. } => {
                warn!(content_type = %content_type, "Unsupported media type, skipping part");
            }
            Part::Reasoning(text) => {
                chunks.push(ContentChunk::thinking(vec![ContentChunk::text(text.clone())]));
            }
            Part::Custom(value) => chunks.push(ContentChunk::from_value(value.clone())?),
            Part::ToolRequest(_) | Part::ToolResponse(_) => {
                debug!(kind = part_kind(part), "Skipping tool part in message content");
            }
        }
    }
    Ok(chunks)
}

fn tool_message(response: &ToolResponse) -> Result<Message, LlmError> {
    let output = serde_json::to_string(&response.output)
        .map_err(|e| LlmError::parse("Failed to serialize tool response output", e))?;
    Ok(Message::tool(
        response.name.clone(),
        response.reference.clone().unwrap_or_default(),
        output,
    ))
}

/// Convert a wire message into a neutral message.
///
/// One tool request per tool call comes first, in wire order, followed by
/// the content. Empty text is dropped.
pub fn from_wire_message(message: &Message) -> Result<ChatMessage, LlmError> {
    let role = match message.role() {
        Role::System => ChatRole::System,
        Role::User => ChatRole::User,
        Role::Assistant => ChatRole::Model,
        Role::Tool => ChatRole::Tool,
    };

    if let Message::Tool {
        content,
        name,
        tool_call_id,
    } = message
    {
        let raw = match content {
            Some(content) => content.flatten_to_text()?,
            None => String::new(),
        };
        let output = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
        let reference = (!tool_call_id.is_empty()).then(|| tool_call_id.clone());
        return Ok(ChatMessage::new(
            role,
            vec![Part::ToolResponse(ToolResponse {
                name: name.clone(),
                reference,
                output,
            })],
        ));
    }

    let mut parts: Vec<Part> = message
        .tool_calls()
        .iter()
        .map(|call| {
            Part::ToolRequest(ToolRequest {
                name: call.function.name.clone(),
                reference: (!call.id.is_empty()).then(|| call.id.clone()),
                input: call.arguments(),
            })
        })
        .collect();

    if let Some(content) = message.content() {
        parts.extend(content_parts(content)?);
    }

    Ok(ChatMessage::new(role, parts))
}

fn content_parts(content: &Content) -> Result<Vec<Part>, LlmError> {
    let chunks = match content {
        Content::Text(text) if text.is_empty() => return Ok(Vec::new()),
        Content::Text(text) => return Ok(vec![Part::text(text.clone())]),
        Content::Chunks(chunks) => chunks,
    };

    let mut parts = Vec::with_capacity(chunks.len());
    for chunk in chunks {
        let part = match chunk {
            ContentChunk::Text { text } if text.is_empty() => continue,
            ContentChunk::Text { text } => Part::text(text.clone()),
            ContentChunk::ImageUrl { url } => Part::media("image/*", url.clone()),
            ContentChunk::Audio { input_audio } => Part::media("audio/*", input_audio.clone()),
            ContentChunk::Thinking { thinking, .. } => Part::Reasoning(reasoning_text(thinking)),
            other => Part::Custom(
                serde_json::to_value(other)
                    .map_err(|e| LlmError::parse("Failed to encode content chunk", e))?,
            ),
        };
        parts.push(part);
    }
    Ok(parts)
}

fn reasoning_text(thinking: &[ContentChunk]) -> String {
    let mut texts = Vec::with_capacity(thinking.len());
    for chunk in thinking {
        match chunk {
            ContentChunk::Text { text } => texts.push(text.as_str()),
            other => {
                warn!(chunk_type = other.chunk_type(), "Skipping non-text chunk in thinking block");
            }
        }
    }
    texts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::request::CompletionConfig;
    use crate::chat::response::{ChatCompletionChoice, UsageInfo};
    use crate::core::types::OutputConfig;
    use serde_json::json;
    use std::time::Duration;

    fn tool(name: &str) -> Tool {
        Tool {
            name: name.to_string(),
            description: Some(format!("{name} numbers")),
            parameters: json!({"type": "object", "properties": {"a": {"type": "number"}}}),
            strict: None,
        }
    }

    fn response_with(message: Message, finish_reason: Option<FinishReason>) -> ChatCompletionResponse {
        ChatCompletionResponse {
            id: "cmpl-1".to_string(),
            object: "chat.completion".to_string(),
            created: 0,
            model: "x-small".to_string(),
            choices: vec![ChatCompletionChoice {
                index: 0,
                message,
                finish_reason,
            }],
            usage: UsageInfo {
                prompt_tokens: 3,
                completion_tokens: 4,
                total_tokens: 7,
            },
            latency: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_build_rejects_empty_model_and_messages() {
        let request = GenerateRequest::new(vec![ChatMessage::user("hi")]);
        assert!(matches!(
            build_chat_request("", &request),
            Err(LlmError::EmptyModel)
        ));
        assert!(matches!(
            build_chat_request("m", &GenerateRequest::default()),
            Err(LlmError::EmptyMessages)
        ));
    }

    #[test]
    fn test_build_simple_conversation() {
        let request = GenerateRequest::new(vec![
            ChatMessage::system("You are a helpful assistant."),
            ChatMessage::user("Hello!"),
        ]);
        let wire = build_chat_request("x-small", &request).unwrap();
        let body = serde_json::to_value(&wire).unwrap();

        assert_eq!(
            body["messages"],
            json!([
                {"role": "system", "content": "You are a helpful assistant."},
                {"role": "user", "content": "Hello!"}
            ])
        );
        assert_eq!(body["parallel_tool_calls"], json!(true));
        assert_eq!(body["response_format"], json!({"type": "text"}));
        assert!(body.get("tools").is_none());
        assert!(body.get("tool_choice").is_none());
    }

    #[test]
    fn test_build_maps_tools_and_choice() {
        let cases = [
            (None, ToolChoiceType::Auto),
            (Some(ToolChoice::Auto), ToolChoiceType::Auto),
            (Some(ToolChoice::Required), ToolChoiceType::Any),
            (Some(ToolChoice::None), ToolChoiceType::None),
        ];
        for (choice, expected) in cases {
            let mut request =
                GenerateRequest::new(vec![ChatMessage::user("add")]).with_tools(vec![tool("add")]);
            request.tool_choice = choice;
            let wire = build_chat_request("m", &request).unwrap();
            assert_eq!(wire.tool_choice, Some(expected));
            let tools = wire.tools.unwrap();
            assert_eq!(tools.len(), 1);
            assert_eq!(tools[0].function.name, "add");
            assert_eq!(tools[0].function.description, "add numbers");
        }
    }

    #[test]
    fn test_build_ignores_tool_choice_without_tools() {
        let request = GenerateRequest::new(vec![ChatMessage::user("hi")])
            .with_tool_choice(ToolChoice::Required);
        let wire = build_chat_request("m", &request).unwrap();
        assert_eq!(wire.tool_choice, None);
        assert_eq!(wire.tools, None);
    }

    #[test]
    fn test_build_output_policy() {
        let schema = json!({"type": "object", "properties": {"name": {"type": "string"}}});
        let constrained = GenerateRequest::new(vec![ChatMessage::user("hi")])
            .with_output(OutputConfig::json_schema(schema.clone()));
        let wire = build_chat_request("m", &constrained).unwrap();
        assert_eq!(wire.response_format, Some(ResponseFormat::json_schema(schema.clone())));

        let unconstrained = GenerateRequest::new(vec![ChatMessage::user("hi")]).with_output(
            OutputConfig {
                format: OutputFormat::Json,
                constrained: false,
                schema: Some(schema),
            },
        );
        let wire = build_chat_request("m", &unconstrained).unwrap();
        assert_eq!(wire.response_format, Some(ResponseFormat::text()));
    }

    #[test]
    fn test_build_constrained_json_without_schema_uses_empty_schema() {
        let request = GenerateRequest::new(vec![ChatMessage::user("hi")]).with_output(
            OutputConfig {
                format: OutputFormat::Json,
                constrained: true,
                schema: None,
            },
        );
        let wire = build_chat_request("m", &request).unwrap();
        assert_eq!(
            wire.response_format,
            Some(ResponseFormat::json_schema(json!({})))
        );

        let body = serde_json::to_value(&wire).unwrap();
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "responseJsonSchema");
        assert_eq!(body["response_format"]["json_schema"]["strict"], true);
    }

    #[test]
    fn test_build_forces_stream_off() {
        let config = CompletionConfig {
            stream: true,
            ..CompletionConfig::default().with_temperature(0.2)
        };
        let request = GenerateRequest::new(vec![ChatMessage::user("hi")]).with_config(config);
        let wire = build_chat_request("m", &request).unwrap();
        assert!(!wire.config.stream);
        assert_eq!(wire.config.temperature, Some(0.2));
    }

    #[test]
    fn test_user_message_with_media_becomes_chunks() {
        let message = ChatMessage::new(
            ChatRole::User,
            vec![
                Part::text("describe"),
                Part::media("image/png", "https://example.com/a.png"),
                Part::media("audio/mp3", "https://example.com/a.mp3"),
                Part::media("video/mp4", "https://example.com/a.mp4"),
            ],
        );
        let wire = to_wire_messages(&message).unwrap();
        assert_eq!(
            wire,
            vec![Message::user(vec![
                ContentChunk::text("describe"),
                ContentChunk::image_url("https://example.com/a.png"),
                ContentChunk::audio("https://example.com/a.mp3"),
            ])]
        );
    }

    #[test]
    fn test_user_text_parts_are_joined() {
        let message = ChatMessage::new(ChatRole::User, vec![Part::text("a"), Part::text("b")]);
        assert_eq!(to_wire_messages(&message).unwrap(), vec![Message::user("a\nb")]);
    }

    #[test]
    fn test_system_message_must_be_text() {
        let message = ChatMessage::new(
            ChatRole::System,
            vec![Part::media("image/png", "https://example.com/a.png")],
        );
        assert!(matches!(
            to_wire_messages(&message),
            Err(LlmError::NonTextContent(_))
        ));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let message = ChatMessage::new(ChatRole::Other("critic".to_string()), vec![]);
        assert!(matches!(
            to_wire_messages(&message),
            Err(LlmError::InvalidRole(ref r)) if r == "critic"
        ));
    }

    #[test]
    fn test_assistant_tool_requests_become_tool_calls() {
        let message = ChatMessage::new(
            ChatRole::Model,
            vec![
                Part::ToolRequest(ToolRequest {
                    name: "add".to_string(),
                    reference: Some("c1".to_string()),
                    input: json!({"a": 1}),
                }),
                Part::ToolRequest(ToolRequest {
                    name: "echo".to_string(),
                    reference: Some("c2".to_string()),
                    input: json!("hi"),
                }),
            ],
        );
        let wire = to_wire_messages(&message).unwrap();
        assert_eq!(
            wire,
            vec![Message::assistant_tool_calls(
                None,
                vec![
                    ToolCall::new("c1", 0, "add", json!({"a": 1})),
                    ToolCall::new("c2", 1, "echo", json!({"input": "hi"})),
                ],
            )]
        );
    }

    #[test]
    fn test_tool_message_per_response_part() {
        let message = ChatMessage::new(
            ChatRole::Tool,
            vec![
                Part::ToolResponse(ToolResponse {
                    name: "add".to_string(),
                    reference: Some("c1".to_string()),
                    output: json!({"sum": 3}),
                }),
                Part::ToolResponse(ToolResponse {
                    name: "inc".to_string(),
                    reference: Some("c2".to_string()),
                    output: json!(5),
                }),
            ],
        );
        let wire = to_wire_messages(&message).unwrap();
        assert_eq!(
            wire,
            vec![
                Message::tool("add", "c1", r#"{"sum":3}"#),
                Message::tool("inc", "c2", "5"),
            ]
        );
    }

    #[test]
    fn test_parse_two_tool_calls_without_text() {
        let response = response_with(
            Message::Assistant {
                content: Some(Content::text("")),
                tool_calls: Some(vec![
                    ToolCall::new("c1", 0, "add", json!({"a": 1, "b": 2})),
                    ToolCall::new("c2", 1, "inc", Value::Null),
                ]),
                prefix: false,
            },
            Some(FinishReason::ToolCalls),
        );
        let parsed = parse_chat_response(&response).unwrap();
        let message = parsed.message.unwrap();

        assert_eq!(message.role, ChatRole::Model);
        assert_eq!(
            message.content,
            vec![
                Part::ToolRequest(ToolRequest {
                    name: "add".to_string(),
                    reference: Some("c1".to_string()),
                    input: json!({"a": 1, "b": 2}),
                }),
                Part::ToolRequest(ToolRequest {
                    name: "inc".to_string(),
                    reference: Some("c2".to_string()),
                    input: json!({}),
                }),
            ]
        );
        assert_eq!(parsed.finish_reason, StopReason::Stop);
    }

    #[test]
    fn test_parse_text_and_tool_calls_together() {
        let response = response_with(
            Message::assistant_tool_calls(
                Some(Content::text("Calling add")),
                vec![ToolCall::new("c1", 0, "add", json!({"a": 1}))],
            ),
            Some(FinishReason::ToolCalls),
        );
        let message = parse_chat_response(&response).unwrap().message.unwrap();
        assert_eq!(
            message.content,
            vec![
                Part::ToolRequest(ToolRequest {
                    name: "add".to_string(),
                    reference: Some("c1".to_string()),
                    input: json!({"a": 1}),
                }),
                Part::text("Calling add"),
            ]
        );
    }

    #[test]
    fn test_parse_zero_choices_keeps_usage() {
        let mut response = response_with(Message::assistant("unused"), None);
        response.choices.clear();
        let parsed = parse_chat_response(&response).unwrap();

        assert!(parsed.message.is_none());
        assert_eq!(parsed.usage.total_tokens, 7);
        assert_eq!(parsed.latency, Duration::from_millis(12));
        assert_eq!(parsed.finish_reason, StopReason::Unknown);
    }

    #[test]
    fn test_parse_uses_first_choice_only() {
        let mut response = response_with(Message::assistant("first"), Some(FinishReason::Stop));
        response.choices.push(ChatCompletionChoice {
            index: 1,
            message: Message::assistant("second"),
            finish_reason: Some(FinishReason::Length),
        });
        let parsed = parse_chat_response(&response).unwrap();
        assert_eq!(parsed.text(), "first");
        assert_eq!(parsed.finish_reason, StopReason::Stop);
    }

    #[test]
    fn test_finish_reason_table() {
        assert_eq!(map_finish_reason(Some(&FinishReason::Stop)), StopReason::Stop);
        assert_eq!(map_finish_reason(Some(&FinishReason::Length)), StopReason::Length);
        assert_eq!(map_finish_reason(Some(&FinishReason::ModelLength)), StopReason::Length);
        assert_eq!(map_finish_reason(Some(&FinishReason::Error)), StopReason::Interrupted);
        assert_eq!(map_finish_reason(Some(&FinishReason::ToolCalls)), StopReason::Stop);
        assert_eq!(
            map_finish_reason(Some(&FinishReason::Other("content_filter".to_string()))),
            StopReason::Unknown
        );
        assert_eq!(map_finish_reason(None), StopReason::Unknown);
    }

    #[test]
    fn test_parts_to_text_refuses_non_text() {
        assert_eq!(parts_to_text(&[Part::text("a"), Part::text("b")]).unwrap(), "a\nb");
        assert!(matches!(
            parts_to_text(&[Part::text("a"), Part::Reasoning("hmm".to_string())]),
            Err(LlmError::NonTextContent(ref k)) if k == "reasoning"
        ));
    }

    #[test]
    fn test_from_wire_tool_message_decodes_output() {
        let message = from_wire_message(&Message::tool("add", "c1", r#"{"sum":3}"#)).unwrap();
        assert_eq!(
            message.content,
            vec![Part::ToolResponse(ToolResponse {
                name: "add".to_string(),
                reference: Some("c1".to_string()),
                output: json!({"sum": 3}),
            })]
        );
    }

    #[test]
    fn test_thinking_keeps_text_and_reports_skipped_chunks() {
        let (logs, _guard) = crate::test_support::CapturedLogs::install();
        let message = Message::assistant(vec![ContentChunk::thinking(vec![
            ContentChunk::text("first"),
            ContentChunk::image_url("https://example.com/sketch.png"),
            ContentChunk::text("second"),
        ])]);

        let parts = from_wire_message(&message).unwrap().content;

        assert_eq!(parts, vec![Part::Reasoning("first\nsecond".to_string())]);
        let output = logs.contents();
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("chunk_type="), "{output}");
        assert!(output.contains("image_url"), "{output}");
    }

    #[test]
    fn test_from_wire_chunks_keep_unmapped_kinds() {
        let message = Message::user(vec![
            ContentChunk::text("see"),
            ContentChunk::image_url("https://example.com/a.png"),
            ContentChunk::file("file-1"),
        ]);
        let parts = from_wire_message(&message).unwrap().content;
        assert_eq!(parts[0], Part::text("see"));
        assert!(parts[1].is_image());
        assert_eq!(parts[2], Part::Custom(json!({"type": "file", "file_id": "file-1"})));
    }
}
