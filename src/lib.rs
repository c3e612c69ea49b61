//! # mistral-client
//!
//! Resilient client for the Mistral chat completion and embedding APIs.
//!
//! Every call goes through one retry loop: an optional rate limiter, a
//! per-attempt deadline, exponential backoff with full jitter, and a
//! cancellation token checked at each suspension point.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mistral_client::{ChatCompletionRequest, Message, MistralClient, MistralConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MistralClient::new(MistralConfig::from_env()?.with_max_retries(5))?;
//!     let request = ChatCompletionRequest::new(
//!         "mistral-small-latest",
//!         vec![
//!             Message::system("You are a helpful assistant."),
//!             Message::user("Hello!"),
//!         ],
//!     );
//!
//!     let response = client
//!         .chat_completion(&CancellationToken::new(), request)
//!         .await?;
//!     println!("{}", response.text()?);
//!     Ok(())
//! }
//! ```
//!
//! Framework adapters can work with the neutral types in [`crate::core::types`] and
//! call [`MistralClient::generate`], which converts to and from the wire model.

pub mod chat;
pub mod core;
pub mod embeddings;
pub mod provider;

#[cfg(test)]
mod test_support;

pub use crate::chat::{
    ChatCompletionRequest, ChatCompletionResponse, CompletionConfig, Content, ContentChunk,
    FinishReason, Message, ResponseFormat, Role, ToolCall, ToolChoiceType, ToolDefinition,
};
pub use crate::core::{
    ErrorResponse, HttpClientConfig, HttpTransport, LlmError, NoneRateLimiter, RateLimiter,
    TokenBucketRateLimiter, TransportError, TransportErrorKind,
};
pub use crate::embeddings::{EmbeddingRequest, EmbeddingResponse};
pub use crate::provider::{MistralClient, MistralConfig};
