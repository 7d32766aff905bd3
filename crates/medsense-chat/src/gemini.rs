//! Gemini text-generation client.

use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use medsense_core::{Error, Result};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";

/// The language-model collaborator: prompt in, text out.
///
/// `Stub` stands in when no API key is configured so the rest of the
/// pipeline (mapping, risk, retrieval) keeps working end to end.
pub enum LlmClient {
    Gemini(GeminiClient),
    Stub,
}

impl LlmClient {
    pub fn from_api_key(api_key: Option<&str>) -> Self {
        match api_key {
            Some(key) => Self::Gemini(GeminiClient::new(key)),
            None => {
                warn!("No LLM API key configured; replies will be stubbed");
                Self::Stub
            }
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            Self::Gemini(client) => client.generate(prompt).await,
            Self::Stub => Ok(json!({
                "explanation": "No language model is configured; showing rule-based results only.",
                "suggested_actions": ["Configure GEMINI_API_KEY to enable full replies"],
            })
            .to_string()),
        }
    }
}

/// Non-streaming call to the Gemini generateContent API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_CHAT_MODEL.into(),
        }
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            API_BASE, self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        debug!(model = %self.model, prompt_len = prompt.len(), "LLM request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Http(format!("LLM request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Http(format!("LLM API error {}", response.status())));
        }

        let parsed: Value = response
            .json()
            .await
            .map_err(|e| Error::Http(format!("malformed LLM response: {}", e)))?;

        parsed["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|t| t.to_string())
            .ok_or_else(|| Error::Http("LLM response missing text".into()))
    }
}
