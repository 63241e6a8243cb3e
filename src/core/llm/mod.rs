//! Reply generation via the chat-completions backend
//!
//! Single-turn, non-streaming requests against an OpenAI-compatible
//! `/chat/completions` endpoint. No retry and no conversation history: one
//! blocking round trip per inbound request, failures propagate to the HTTP
//! layer.

use crate::config::GroqConfig;
use crate::utils::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Chat-completions response body (the fields we read)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for the language-model backend
#[derive(Debug, Clone)]
pub struct ChatClient {
    config: GroqConfig,
    client: reqwest::Client,
}

impl ChatClient {
    /// Create a new chat client
    pub fn new(config: GroqConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Obtain a free-form reply for a single-turn prompt
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        debug!(model = %self.config.model, prompt_len = prompt.len(), "Chat completion request");

        let url = format!("{}/chat/completions", self.config.get_api_base());
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| RelayError::Generation("API key is required".to_string()))?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Generation(format!("network: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.ok();
            return Err(match status {
                400 => RelayError::Generation(
                    body.unwrap_or_else(|| "Bad request".to_string()),
                ),
                401 => RelayError::Generation("Invalid API key".to_string()),
                429 => RelayError::Generation("Rate limit exceeded".to_string()),
                _ => RelayError::Generation(format!("Completion failed: {}", status)),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| RelayError::Generation(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| RelayError::Generation("Response contained no choices".to_string()))
    }
}
