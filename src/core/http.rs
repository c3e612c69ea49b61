//! Shared HTTP client with retry logic.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use rand::{SeedableRng, rngs::StdRng};
use reqwest::{
    Method, StatusCode,
    header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::backoff::Backoff;
use super::error::{ErrorResponse, LlmError};
use super::traits::{HttpTransport, RateLimiter};
use super::transport::{HttpRequest, TransportError, TransportErrorKind};

pub const DEFAULT_RETRY_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Configuration for HTTP client resilience
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Deadline for a single attempt
    pub timeout: Duration,
    pub max_retries: u32,
    /// Lower bound of the backoff (the first retry waits exactly this long)
    pub initial_retry_delay: Duration,
    /// Cap on the backoff duration
    pub max_retry_delay: Duration,
    /// Statuses worth retrying. `None` falls back to [`DEFAULT_RETRY_STATUS_CODES`].
    pub retry_status_codes: Option<Vec<u16>>,
    /// Seed for backoff jitter. `None` draws fresh entropy for every call.
    pub jitter_seed: Option<u64>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(60),
            max_retries: 3,
            initial_retry_delay: Duration::from_millis(500),
            max_retry_delay: Duration::from_secs(10),
            retry_status_codes: None,
            jitter_seed: None,
        }
    }
}

impl HttpClientConfig {
    pub fn backoff(&self) -> Backoff {
        Backoff::new(self.initial_retry_delay, self.max_retry_delay)
    }
}

/// Shared HTTP client: rate limiting, retries with backoff, and cancellation.
///
/// One instance serves any number of concurrent calls. Each call runs its own
/// retry loop and owns its jitter source.
pub struct HttpClient {
    transport: Arc<dyn HttpTransport>,
    rate_limiter: Arc<dyn RateLimiter>,
    config: HttpClientConfig,
    retry_status_codes: HashSet<u16>,
    verbose: bool,
}

impl HttpClient {
    pub fn new(
        config: HttpClientConfig,
        transport: Arc<dyn HttpTransport>,
        rate_limiter: Arc<dyn RateLimiter>,
        verbose: bool,
    ) -> Self {
        let retry_status_codes = match &config.retry_status_codes {
            Some(codes) if !codes.is_empty() => codes.iter().copied().collect(),
            _ => DEFAULT_RETRY_STATUS_CODES.into_iter().collect(),
        };

        Self {
            transport,
            rate_limiter,
            config,
            retry_status_codes,
            verbose,
        }
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        self.retry_status_codes.contains(&status.as_u16())
    }

    /// POST a JSON body and decode the JSON response.
    ///
    /// Makes at most `1 + max_retries` attempts. Transient transport failures and
    /// retryable statuses are retried after a backoff; anything else is returned
    /// immediately. Cancellation is checked at every suspension point.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, cancel, url, headers, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        cancel: &CancellationToken,
        url: &str,
        headers: &[(String, String)],
        body: &Req,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize + Sync,
        Res: DeserializeOwned,
    {
        let payload = serde_json::to_vec(body).map_err(|e| LlmError::Parse {
            message: "Failed to serialize request body".to_string(),
            source: Box::new(e),
        })?;
        let payload = Bytes::from(payload);

        if self.verbose {
            debug!(body = %String::from_utf8_lossy(&payload), "Request body");
        }

        let header_map = build_headers(headers)?;
        let backoff = self.config.backoff();
        let mut rng = match self.config.jitter_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let max_retries = self.config.max_retries;

        let mut attempt: u32 = 0;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LlmError::Cancelled),
                _ = self.rate_limiter.wait() => {}
            }

            // Rebuilt each attempt since the transport consumes it
            let request = HttpRequest {
                method: Method::POST,
                url: url.to_string(),
                headers: header_map.clone(),
                body: payload.clone(),
            };

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LlmError::Cancelled),
                result = tokio::time::timeout(self.config.timeout, self.transport.send(request)) => {
                    result.unwrap_or_else(|_| {
                        Err(TransportError::timeout(format!(
                            "Request exceeded timeout of {:?}",
                            self.config.timeout
                        )))
                    })
                }
            };

            let delay = match outcome {
                Ok(response) if response.status.is_success() => {
                    debug!(status = %response.status, attempt, "HTTP request successful");
                    if self.verbose {
                        debug!(body = %String::from_utf8_lossy(&response.body), "Response body");
                    }

                    return serde_json::from_slice(&response.body).map_err(|e| LlmError::Parse {
                        message: "Failed to parse API response".to_string(),
                        source: Box::new(e),
                    });
                }
                Ok(response) => {
                    let status = response.status;
                    if !(self.is_retryable_status(status) && attempt < max_retries) {
                        warn!(attempt, status = %status, "API returned error status");
                        return Err(status_error(status, &response.body));
                    }
                    // The body was fully read by the transport; discard it.
                    drop(response);
                    let delay = backoff.delay(attempt, &mut rng);
                    warn!(
                        attempt,
                        status = %status,
                        max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "API returned retryable status, retrying"
                    );
                    delay
                }
                Err(error) => {
                    if error.kind() == TransportErrorKind::Cancelled {
                        return Err(LlmError::Cancelled);
                    }
                    if !(error.is_retryable() && attempt < max_retries) {
                        warn!(attempt, error = %error, "HTTP request failed");
                        return Err(LlmError::Network {
                            message: format!(
                                "Request failed (attempt {}/{})",
                                attempt + 1,
                                max_retries + 1
                            ),
                            source: error,
                        });
                    }
                    let delay = backoff.delay(attempt, &mut rng);
                    warn!(
                        attempt,
                        error = %error,
                        max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "HTTP request failed, retrying"
                    );
                    delay
                }
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LlmError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }

            attempt += 1;
        }
    }
}

fn build_headers(extra: &[(String, String)]) -> Result<HeaderMap, LlmError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            LlmError::ProviderConfiguration(format!("Invalid header name '{name}': {e}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            LlmError::ProviderConfiguration(format!("Invalid value for header '{name}': {e}"))
        })?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Terminal non-2xx response: structured payload when the body has that shape.
fn status_error(status: StatusCode, body: &[u8]) -> LlmError {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(error) => LlmError::Provider {
            status_code: status.as_u16(),
            error,
        },
        Err(_) => LlmError::Api {
            status_code: status.as_u16(),
            body: String::from_utf8_lossy(body).into_owned(),
        },
    }
}
