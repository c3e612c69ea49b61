//! Single-attempt HTTP transport and transport failure classification.

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Method, StatusCode, header::HeaderMap};
use thiserror::Error;

use super::error::LlmError;
use super::traits::HttpTransport;

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The attempt ran past its deadline.
    Timeout,
    /// The peer closed the stream before a complete response was read.
    UnexpectedEof,
    Connect,
    Cancelled,
    Other,
}

/// A failure below the HTTP status level: nothing usable came back.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Timeout, message)
    }

    pub fn unexpected_eof(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::UnexpectedEof, message)
    }

    pub fn connect(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Connect, message)
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Cancelled, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Other, message)
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn is_retryable(&self) -> bool {
        is_retryable(self)
    }
}

/// Timeouts and truncated responses are transient. Cancellation is never
/// retried, and unknown failure modes fail fast.
pub fn is_retryable(error: &TransportError) -> bool {
    match error.kind {
        TransportErrorKind::Timeout | TransportErrorKind::UnexpectedEof => true,
        TransportErrorKind::Cancelled
        | TransportErrorKind::Connect
        | TransportErrorKind::Other => false,
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = classify_reqwest_error(&error);
        TransportError::new(kind, format!("HTTP transport failure: {error}")).with_source(error)
    }
}

fn classify_reqwest_error(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_timeout() {
        return TransportErrorKind::Timeout;
    }

    let mut source = error.source();
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<std::io::Error>() {
            match io_error.kind() {
                std::io::ErrorKind::TimedOut => return TransportErrorKind::Timeout,
                std::io::ErrorKind::UnexpectedEof => return TransportErrorKind::UnexpectedEof,
                _ => {}
            }
        }
        source = cause.source();
    }

    if error.is_body() {
        // The body stream broke off after the headers arrived.
        TransportErrorKind::UnexpectedEof
    } else if error.is_connect() {
        TransportErrorKind::Connect
    } else {
        TransportErrorKind::Other
    }
}

/// Default transport backed by a pooled `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                LlmError::ProviderConfiguration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self { client })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        Ok(HttpResponse { status, body })
    }
}
