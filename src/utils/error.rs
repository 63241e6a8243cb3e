//! Error handling for the relay
//!
//! This module defines all error types used throughout the service.

use thiserror::Error;

/// Result type alias for the relay
pub type Result<T> = std::result::Result<T, RelayError>;

/// Main error type for the relay
#[derive(Error, Debug)]
pub enum RelayError {
    /// Configuration errors (fatal at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Audio transcoding failed; the orchestrator recovers by falling back
    /// to the original upload, so this never reaches the HTTP layer
    #[error("Transcode error: {0}")]
    Transcode(String),

    /// The recognition backend could not produce a transcript
    #[error("Recognition error: {0}")]
    Recognition(String),

    /// The language-model backend could not produce a reply
    #[error("Generation error: {0}")]
    Generation(String),

    /// The synthesis backend could not produce audio
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),

    /// Server lifecycle errors
    #[error("Server error: {0}")]
    Server(String),
}

impl RelayError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create a server error
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// Which pipeline stage produced this error, when it came from a backend.
    ///
    /// Used by the HTTP layer so the UI can tell recognition, generation and
    /// synthesis failures apart instead of showing one opaque 500.
    pub fn backend_kind(&self) -> Option<&'static str> {
        match self {
            Self::Recognition(_) => Some("recognition"),
            Self::Generation(_) => Some("generation"),
            Self::Synthesis(_) => Some("synthesis"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_for_backend_errors() {
        assert_eq!(
            RelayError::Recognition("x".into()).backend_kind(),
            Some("recognition")
        );
        assert_eq!(
            RelayError::Generation("x".into()).backend_kind(),
            Some("generation")
        );
        assert_eq!(
            RelayError::Synthesis("x".into()).backend_kind(),
            Some("synthesis")
        );
    }

    #[test]
    fn test_backend_kind_for_local_errors() {
        assert_eq!(RelayError::Transcode("x".into()).backend_kind(), None);
        assert_eq!(RelayError::config("x").backend_kind(), None);
        assert_eq!(RelayError::validation("x").backend_kind(), None);
    }

    #[test]
    fn test_display_includes_detail() {
        let err = RelayError::Generation("rate limit exceeded".into());
        assert_eq!(err.to_string(), "Generation error: rate limit exceeded");
    }
}
