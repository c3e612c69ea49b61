//! Embedding request and response types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::chat::UsageInfo;
use crate::core::error::LlmError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    pub model: String,
    pub input: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dimension: Option<u32>,
    /// e.g. `float`, `int8`, `binary`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dtype: Option<String>,
}

impl EmbeddingRequest {
    pub fn new(model: impl Into<String>, input: Vec<String>) -> Self {
        Self {
            model: model.into(),
            input,
            output_dimension: None,
            output_dtype: None,
        }
    }

    pub fn with_output_dimension(mut self, dimension: u32) -> Self {
        self.output_dimension = Some(dimension);
        self
    }

    pub fn with_output_dtype(mut self, dtype: impl Into<String>) -> Self {
        self.output_dtype = Some(dtype.into());
        self
    }

    pub fn validate(&self) -> Result<(), LlmError> {
        if self.model.is_empty() {
            return Err(LlmError::EmptyModel);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingData {
    #[serde(default)]
    pub object: String,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub index: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub usage: UsageInfo,
    #[serde(default)]
    pub data: Vec<EmbeddingData>,
    #[serde(skip)]
    pub latency: Duration,
}

impl EmbeddingResponse {
    /// Vectors in the order the provider returned them.
    pub fn embeddings(&self) -> Vec<Vec<f32>> {
        self.data.iter().map(|d| d.embedding.clone()).collect()
    }

    /// Consume the response, returning one vector per input ordered by `index`.
    pub fn into_embeddings(mut self) -> Vec<Vec<f32>> {
        self.data.sort_by_key(|d| d.index);
        self.data.into_iter().map(|d| d.embedding).collect()
    }
}
