//! Text-to-speech via the synthesis backend
//!
//! Fetches MP3 audio from a gTTS-style `/translate_tts` endpoint. One
//! blocking round trip per request, fixed language code, no retry.

pub mod cleaner;

pub use cleaner::clean_for_speech;

use crate::config::TtsConfig;
use crate::utils::error::{RelayError, Result};
use tracing::debug;

/// Client for the speech-synthesis backend
#[derive(Debug, Clone)]
pub struct SpeechSynthesizer {
    config: TtsConfig,
    client: reqwest::Client,
}

impl SpeechSynthesizer {
    /// Create a new synthesizer
    pub fn new(config: TtsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Synthesize text to MP3 bytes
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Err(RelayError::Synthesis(
                "Nothing to synthesize (empty text)".to_string(),
            ));
        }

        debug!(
            lang = %self.config.language,
            text_len = text.len(),
            "Speech synthesis request"
        );

        let url = format!("{}/translate_tts", self.config.get_api_base());
        let textlen = text.len().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.config.language.as_str()),
                ("q", text),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RelayError::Synthesis(format!("network: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(match status {
                429 => RelayError::Synthesis("Rate limit exceeded".to_string()),
                _ => RelayError::Synthesis(format!("Synthesis failed: {}", status)),
            });
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| RelayError::Synthesis(format!("Failed to read audio body: {}", e)))?;

        if audio.is_empty() {
            return Err(RelayError::Synthesis(
                "Backend returned an empty audio body".to_string(),
            ));
        }

        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_text_rejected_before_network() {
        let synthesizer = SpeechSynthesizer::new(TtsConfig::default());
        let err = synthesizer.synthesize("").await.unwrap_err();
        assert!(matches!(err, RelayError::Synthesis(_)));
    }
}
