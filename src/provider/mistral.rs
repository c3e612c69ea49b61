//! Mistral chat completion and embedding client.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::chat::{
    ChatCompletionRequest, ChatCompletionResponse, build_chat_request, parse_chat_response,
};
use crate::core::{
    GenerateRequest, GenerateResponse, HttpClient, HttpClientConfig, HttpTransport, LlmError,
    NoneRateLimiter, RateLimiter, ReqwestTransport,
};
use crate::embeddings::{EmbeddingRequest, EmbeddingResponse};
use crate::provider::constants::mistral;

/// Client configuration. Consumed once by [`MistralClient::new`].
#[derive(Clone)]
pub struct MistralConfig {
    pub api_key: String,
    pub base_url: String,
    pub http_config: HttpClientConfig,
    /// Log request and response bodies at debug level.
    pub verbose: bool,
    pub rate_limiter: Arc<dyn RateLimiter>,
    /// Replaces the reqwest transport, mostly for tests.
    pub transport: Option<Arc<dyn HttpTransport>>,
    pub user_agent: String,
}

impl MistralConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: mistral::API_BASE.to_string(),
            http_config: HttpClientConfig::default(),
            verbose: false,
            rate_limiter: Arc::new(NoneRateLimiter),
            transport: None,
            user_agent: format!("mistral-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Read the API key and optional base URL from the environment.
    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var(mistral::API_KEY_ENV_VAR).map_err(|_| {
            LlmError::ProviderConfiguration(format!(
                "{} environment variable is not set",
                mistral::API_KEY_ENV_VAR
            ))
        })?;

        let config = Self::new(api_key);
        match std::env::var(mistral::BASE_URL_ENV_VAR) {
            Ok(base_url) if !base_url.is_empty() => Ok(config.with_base_url(base_url)),
            _ => Ok(config),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.http_config.max_retries = max_retries;
        self
    }

    pub fn with_retry_delays(mut self, wait_min: Duration, wait_max: Duration) -> Self {
        self.http_config.initial_retry_delay = wait_min;
        self.http_config.max_retry_delay = wait_max;
        self
    }

    /// Replace the default retryable statuses (429, 500, 502, 503, 504).
    pub fn with_retry_status_codes(mut self, codes: Vec<u16>) -> Self {
        self.http_config.retry_status_codes = Some(codes);
        self
    }

    pub fn with_jitter_seed(mut self, seed: u64) -> Self {
        self.http_config.jitter_seed = Some(seed);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_rate_limiter(mut self, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl fmt::Debug for MistralConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MistralConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("http_config", &self.http_config)
            .field("verbose", &self.verbose)
            .field("custom_transport", &self.transport.is_some())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Mistral API client. Cheap to share: wrap it in an `Arc` and call it from
/// as many tasks as needed.
pub struct MistralClient {
    http: HttpClient,
    base_url: String,
    headers: Vec<(String, String)>,
}

impl MistralClient {
    pub fn new(config: MistralConfig) -> Result<Self, LlmError> {
        let transport: Arc<dyn HttpTransport> = match config.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(
                config.http_config.timeout,
                &config.user_agent,
            )?),
        };

        let headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", config.api_key),
            ),
            ("User-Agent".to_string(), config.user_agent),
        ];

        Ok(Self {
            http: HttpClient::new(
                config.http_config,
                transport,
                config.rate_limiter,
                config.verbose,
            ),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers,
        })
    }

    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(MistralConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send a chat completion. Streaming is always disabled.
    #[tracing::instrument(skip(self, cancel, request), fields(model = %request.model), err)]
    pub async fn chat_completion(
        &self,
        cancel: &CancellationToken,
        mut request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        request.validate()?;
        request.normalize();

        let start = Instant::now();
        let body: Value = self
            .http
            .post_json(
                cancel,
                &self.url(mistral::CHAT_COMPLETIONS_ENDPOINT),
                &self.headers,
                &request,
            )
            .await?;
        let mut response = ChatCompletionResponse::from_value(body)?;
        response.latency = start.elapsed();

        debug!(
            id = %response.id,
            choices = response.choices.len(),
            total_tokens = response.usage.total_tokens,
            latency_ms = response.latency.as_millis() as u64,
            "Chat completion received"
        );
        Ok(response)
    }

    #[tracing::instrument(skip(self, cancel, request), fields(model = %request.model), err)]
    pub async fn embeddings(
        &self,
        cancel: &CancellationToken,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, LlmError> {
        request.validate()?;

        let start = Instant::now();
        let mut response: EmbeddingResponse = self
            .http
            .post_json(
                cancel,
                &self.url(mistral::EMBEDDINGS_ENDPOINT),
                &self.headers,
                &request,
            )
            .await?;
        response.latency = start.elapsed();

        debug!(
            vectors = response.data.len(),
            latency_ms = response.latency.as_millis() as u64,
            "Embeddings received"
        );
        Ok(response)
    }

    /// Embed `texts` with `model`, one vector per text in input order.
    pub async fn text_embedding(
        &self,
        cancel: &CancellationToken,
        texts: Vec<String>,
        model: &str,
    ) -> Result<Vec<Vec<f32>>, LlmError> {
        let response = self
            .embeddings(cancel, EmbeddingRequest::new(model, texts))
            .await?;
        Ok(response.into_embeddings())
    }

    /// Run a provider-neutral generation request against `model`.
    pub async fn generate(
        &self,
        cancel: &CancellationToken,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, LlmError> {
        let wire = build_chat_request(model, request)?;
        let response = self.chat_completion(cancel, wire).await?;
        parse_chat_response(&response)
    }
}
