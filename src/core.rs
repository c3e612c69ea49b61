pub mod backoff;
pub mod error;
pub mod http;
pub mod rate_limit;
pub mod traits;
pub mod transport;
pub mod types;

pub use backoff::Backoff;
pub use error::{ErrorDetail, ErrorMessage, ErrorResponse, LlmError};
pub use http::{DEFAULT_RETRY_STATUS_CODES, HttpClient, HttpClientConfig};
pub use rate_limit::{NoneRateLimiter, TokenBucketRateLimiter};
pub use traits::{HttpTransport, RateLimiter};
pub use transport::{
    HttpRequest, HttpResponse, ReqwestTransport, TransportError, TransportErrorKind, is_retryable,
};
pub use types::{
    ChatMessage, ChatRole, GenerateRequest, GenerateResponse, LanguageModelUsage, OutputConfig,
    OutputFormat, Part, ResponseMetadata, StopReason, Tool, ToolChoice, ToolRequest, ToolResponse,
};
