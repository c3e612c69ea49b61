//! Chat completion wire model.

pub mod assembly;
pub mod content;
pub mod message;
pub mod request;
pub mod response;
pub mod tool;

pub use assembly::{
    build_chat_request, from_wire_message, map_finish_reason, map_tool_choice,
    parse_chat_response, parts_to_text, to_wire_messages,
};
pub use content::{Content, ContentChunk, flatten_chunks};
pub use message::{Message, Role, encode_role};
pub use request::{
    ChatCompletionRequest, CompletionConfig, JsonSchema, RESPONSE_JSON_SCHEMA_NAME,
    ResponseFormat, ResponseFormatType,
};
pub use response::{ChatCompletionChoice, ChatCompletionResponse, FinishReason, UsageInfo};
pub use tool::{
    FunctionCall, FunctionDefinition, PropertyDefinition, ToolCall, ToolChoiceType,
    ToolDefinition, ToolType, decode_arguments,
};
