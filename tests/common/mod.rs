#![allow(dead_code)]

use std::time::Duration;

use mistral_client::{MistralClient, MistralConfig};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use wiremock::{Match, MockServer, Request, ResponseTemplate};

pub const API_KEY: &str = "test-key";
pub const CHAT_PATH: &str = "/v1/chat/completions";
pub const EMBEDDINGS_PATH: &str = "/v1/embeddings";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Config pointed at the mock server with short, deterministic backoff.
pub fn config_for(server: &MockServer) -> MistralConfig {
    init_tracing();
    MistralConfig::new(API_KEY)
        .with_base_url(format!("{}/", server.uri()))
        .with_retry_delays(Duration::from_millis(10), Duration::from_millis(40))
        .with_jitter_seed(7)
        .with_timeout(Duration::from_secs(5))
}

pub fn client_for(server: &MockServer) -> MistralClient {
    MistralClient::new(config_for(server)).expect("client")
}

pub fn chat_body(content: &str) -> Value {
    json!({
        "id": "cmpl-test",
        "object": "chat.completion",
        "created": 1_717_000_000,
        "model": "x-small",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
    })
}

pub fn chat_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(chat_body(content))
}

pub fn validation_error_body() -> Value {
    json!({
        "object": "error",
        "type": "invalid_request_error",
        "message": {
            "detail": [{
                "type": "extra_forbidden",
                "loc": ["body", "parallel_tool_calls"],
                "msg": "Extra inputs are not permitted",
                "input": true
            }]
        },
        "param": null,
        "code": null
    })
}

pub fn request_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body is JSON")
}

#[derive(Clone)]
pub struct BodyContains(pub &'static str);

impl Match for BodyContains {
    fn matches(&self, request: &Request) -> bool {
        std::str::from_utf8(&request.body)
            .map(|body| body.contains(self.0))
            .unwrap_or(false)
    }
}
