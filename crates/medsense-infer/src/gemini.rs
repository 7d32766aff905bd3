//! Remote embedder backed by the Gemini embedContent API.

use std::time::Duration;

use ndarray::Array1;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::embedder::{EmbedderBackend, Embedding};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-004";
/// Output dimension of text-embedding-004.
pub const GEMINI_EMBED_DIM: usize = 768;

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: EmbedValues,
}

#[derive(Debug, Deserialize)]
struct EmbedValues {
    values: Vec<f32>,
}

/// Blocking Gemini embedder. One HTTP call per `embed`; any failure
/// (network, quota, malformed response) degrades to a zero vector.
pub struct GeminiEmbedder {
    client: reqwest::blocking::Client,
    api_key: String,
    model: String,
}

impl GeminiEmbedder {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_EMBED_MODEL)
    }

    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    fn request(&self, text: &str) -> Result<Vec<f32>, String> {
        let url = format!(
            "{}/{}:embedContent?key={}",
            API_BASE, self.model, self.api_key
        );
        let body = json!({
            "model": format!("models/{}", self.model),
            "content": { "parts": [{ "text": text }] },
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("API error {}", response.status()));
        }

        let parsed: EmbedResponse = response
            .json()
            .map_err(|e| format!("malformed response: {}", e))?;

        if parsed.embedding.values.len() != GEMINI_EMBED_DIM {
            return Err(format!(
                "unexpected embedding dimension {}",
                parsed.embedding.values.len()
            ));
        }

        Ok(parsed.embedding.values)
    }
}

impl EmbedderBackend for GeminiEmbedder {
    fn embed(&self, text: &str) -> Embedding {
        match self.request(text) {
            Ok(values) => Embedding::ok(Array1::from_vec(values)),
            Err(cause) => {
                warn!("Embedding degraded to zero vector: {}", cause);
                Embedding::degraded(GEMINI_EMBED_DIM, cause)
            }
        }
    }

    fn dimension(&self) -> usize {
        GEMINI_EMBED_DIM
    }
}
