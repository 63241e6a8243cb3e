//! Configuration management for the relay
//!
//! This module handles loading and validation of the service configuration.

use crate::utils::error::{RelayError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration struct for the relay
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Groq backend configuration (chat completions and transcription)
    #[serde(default)]
    pub groq: GroqConfig,

    /// Speech-synthesis backend configuration
    #[serde(default)]
    pub tts: TtsConfig,

    /// Scratch directory for transient audio artifacts.
    /// Defaults to the system temp directory.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RelayError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| RelayError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// The Groq credential is the one required value; a missing key is a
    /// startup-time failure rather than a per-request one.
    pub fn validate(&self) -> Result<()> {
        if self.groq.get_api_key().is_none() {
            return Err(RelayError::Config(
                "Groq API key not provided and GROQ_API_KEY environment variable not set"
                    .to_string(),
            ));
        }

        if self.groq.timeout_secs == 0 {
            return Err(RelayError::Config(
                "groq.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Scratch directory for transient artifacts
    pub fn scratch_dir(&self) -> PathBuf {
        self.scratch_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Groq backend configuration
///
/// One base URL and one credential cover both chat completions and audio
/// transcription (the endpoints are siblings under the same API root).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    /// API key for Groq authentication
    pub api_key: Option<String>,

    /// API base URL (default: https://api.groq.com/openai/v1)
    pub api_base: Option<String>,

    /// Chat model for reply generation
    #[serde(default = "default_chat_model")]
    pub model: String,

    /// Whisper model for transcription
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// Language hint for transcription (ISO-639-1), optional
    pub stt_language: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            model: default_chat_model(),
            stt_model: default_stt_model(),
            stt_language: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl GroqConfig {
    /// Get API key with environment variable fallback
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("GROQ_API_KEY").ok())
    }

    /// Get API base with environment variable fallback
    pub fn get_api_base(&self) -> String {
        self.api_base
            .clone()
            .or_else(|| std::env::var("GROQ_API_BASE").ok())
            .unwrap_or_else(|| "https://api.groq.com/openai/v1".to_string())
    }

    /// Request timeout
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

/// Speech-synthesis backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Synthesis endpoint base URL (default: https://translate.google.com)
    pub api_base: Option<String>,

    /// Fixed language code for synthesized speech
    #[serde(default = "default_tts_language")]
    pub language: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            language: default_tts_language(),
            timeout_secs: default_timeout(),
        }
    }
}

impl TtsConfig {
    /// Get API base with environment variable fallback
    pub fn get_api_base(&self) -> String {
        self.api_base
            .clone()
            .or_else(|| std::env::var("TTS_API_BASE").ok())
            .unwrap_or_else(|| "https://translate.google.com".to_string())
    }

    /// Request timeout
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_chat_model() -> String {
    "groq/compound-mini".to_string()
}

fn default_stt_model() -> String {
    "whisper-large-v3-turbo".to_string()
}

fn default_tts_language() -> String {
    "en".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.groq.model, "groq/compound-mini");
        assert_eq!(config.groq.stt_model, "whisper-large-v3-turbo");
        assert_eq!(config.tts.language, "en");
        assert!(config.scratch_dir.is_none());
    }

    #[test]
    fn test_groq_api_base_default() {
        let groq = GroqConfig::default();
        assert_eq!(groq.get_api_base(), "https://api.groq.com/openai/v1");
    }

    #[test]
    fn test_groq_api_base_custom() {
        let groq = GroqConfig {
            api_base: Some("http://localhost:9000".to_string()),
            ..Default::default()
        };
        assert_eq!(groq.get_api_base(), "http://localhost:9000");
    }

    #[test]
    fn test_validate_requires_api_key() {
        // SAFETY: single-threaded test context
        std::env::remove_var("GROQ_API_KEY");
        let config = Config::default();
        assert!(config.validate().is_err());

        let config = Config {
            groq: GroqConfig {
                api_key: Some("test-key".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            groq: GroqConfig {
                api_key: Some("test-key".to_string()),
                timeout_secs: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_deserialization() {
        let yaml = r#"
server:
  port: 8080
groq:
  api_key: test-key
  model: llama-3.3-70b-versatile
tts:
  language: fr
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.groq.api_key, Some("test-key".to_string()));
        assert_eq!(config.groq.model, "llama-3.3-70b-versatile");
        assert_eq!(config.tts.language, "fr");
    }
}
