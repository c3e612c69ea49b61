use async_trait::async_trait;

use super::transport::{HttpRequest, HttpResponse, TransportError};

/// Sends a single HTTP request. Retries are layered on top by [`super::HttpClient`].
///
/// Implementations must read the whole response body before returning so the
/// underlying connection can be reused.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Admission control applied before every attempt.
///
/// `wait` is called concurrently from many in-flight calls and may suspend the
/// caller until a request slot is available.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    async fn wait(&self);
}
