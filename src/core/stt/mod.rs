//! Speech-to-text via the transcription backend
//!
//! Submits a waveform as multipart form data to an OpenAI-compatible
//! `/audio/transcriptions` endpoint (Whisper on Groq) and returns the plain
//! transcript. Backend failure is a `Recognition` error; the orchestrator
//! never recovers it locally.

use crate::config::GroqConfig;
use crate::utils::error::{RelayError, Result};
use serde::Deserialize;
use tracing::debug;

/// Maximum accepted upload size in bytes (25MB, the backend's own limit)
pub const MAX_FILE_SIZE: usize = 25 * 1024 * 1024;

/// Transcription response body (the fields we read)
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for the recognition backend
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    config: GroqConfig,
    client: reqwest::Client,
}

impl TranscriptionClient {
    /// Create a new transcription client
    pub fn new(config: GroqConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Transcribe a waveform to plain text
    pub async fn transcribe(&self, file: Vec<u8>, filename: &str) -> Result<String> {
        if file.len() > MAX_FILE_SIZE {
            return Err(RelayError::Recognition(
                "Audio file too large (max 25MB)".to_string(),
            ));
        }

        debug!(
            model = %self.config.stt_model,
            bytes = file.len(),
            "Transcription request"
        );

        let url = format!("{}/audio/transcriptions", self.config.get_api_base());
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| RelayError::Recognition("API key is required".to_string()))?;

        let form = self.build_form(file, filename)?;

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| RelayError::Recognition(format!("network: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.ok();
            return Err(match status {
                400 => RelayError::Recognition(
                    body.unwrap_or_else(|| "Invalid audio format or parameters".to_string()),
                ),
                401 => RelayError::Recognition("Invalid API key".to_string()),
                413 => RelayError::Recognition("Audio file too large (max 25MB)".to_string()),
                429 => RelayError::Recognition("Rate limit exceeded".to_string()),
                _ => RelayError::Recognition(format!("Transcription failed: {}", status)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| RelayError::Recognition(format!("Failed to read response: {}", e)))?;

        // JSON when response_format=json was honored, plain text otherwise
        if let Ok(parsed) = serde_json::from_str::<TranscriptionResponse>(&response_text) {
            Ok(parsed.text)
        } else {
            Ok(response_text)
        }
    }

    /// Create the multipart form for an audio upload
    fn build_form(&self, file: Vec<u8>, filename: &str) -> Result<reqwest::multipart::Form> {
        use reqwest::multipart;

        let mime = if filename.ends_with(".wav") {
            "audio/wav"
        } else {
            "audio/mpeg"
        };

        let file_part = multipart::Part::bytes(file)
            .file_name(filename.to_string())
            .mime_str(mime)
            .map_err(|e| RelayError::Recognition(format!("Invalid MIME type: {}", e)))?;

        let mut form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.config.stt_model.clone())
            .text("response_format", "json");

        if let Some(language) = &self.config.stt_language {
            form = form.text("language", language.clone());
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TranscriptionClient {
        TranscriptionClient::new(GroqConfig {
            api_key: Some("test-key".to_string()),
            stt_language: Some("en".to_string()),
            ..Default::default()
        })
    }

    #[test]
    fn test_build_form() {
        let form = client().build_form(vec![1, 2, 3], "clip.wav");
        assert!(form.is_ok());
    }

    #[test]
    fn test_response_deserialization() {
        let json = r#"{"text": "hello world", "task": "transcribe", "duration": 1.5}"#;
        let parsed: TranscriptionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text, "hello world");
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_before_network() {
        let err = client()
            .transcribe(vec![0u8; MAX_FILE_SIZE + 1], "clip.wav")
            .await
            .unwrap_err();
        assert!(matches!(err, RelayError::Recognition(_)));
    }
}
