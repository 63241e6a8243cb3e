//! HTTP route modules
//!
//! This module contains all HTTP route handlers organized by functionality.

pub mod audio;
pub mod chat;
pub mod health;

use actix_web::HttpResponse;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Additional metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            meta: None,
        }
    }

    /// Create an error response with metadata
    pub fn error_with_meta(message: String, meta: serde_json::Value) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
            meta: Some(meta),
        }
    }
}

/// Error response helpers
pub mod errors {
    use super::*;
    use crate::utils::error::RelayError;
    use serde_json::json;

    /// Convert RelayError to HTTP response
    ///
    /// Backend failures (recognition/generation/synthesis) map to 502 and
    /// carry their stage in `meta.kind` so the UI can show which step broke
    /// rather than one opaque server error.
    pub fn relay_error_to_response(error: RelayError) -> HttpResponse {
        use actix_web::http::StatusCode;

        if let Some(kind) = error.backend_kind() {
            return HttpResponse::build(StatusCode::BAD_GATEWAY).json(
                ApiResponse::<()>::error_with_meta(error.to_string(), json!({ "kind": kind })),
            );
        }

        let (status, message) = match error {
            RelayError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            RelayError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            RelayError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        HttpResponse::build(status).json(ApiResponse::<()>::error(message))
    }

    /// Create a validation error response
    pub fn validation_error(message: &str) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::<()>::error(message.to_string()))
    }

    /// Create a not found error response
    pub fn not_found_error(message: &str) -> HttpResponse {
        HttpResponse::NotFound().json(ApiResponse::<()>::error(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RelayError;

    #[test]
    fn test_api_response_success() {
        let response = ApiResponse::success("test data");
        assert!(response.success);
        assert_eq!(response.data, Some("test data"));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_api_response_error() {
        let response = ApiResponse::<()>::error("test error".to_string());
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error, Some("test error".to_string()));
    }

    #[test]
    fn test_backend_errors_map_to_bad_gateway() {
        for err in [
            RelayError::Recognition("x".into()),
            RelayError::Generation("x".into()),
            RelayError::Synthesis("x".into()),
        ] {
            let response = errors::relay_error_to_response(err);
            assert_eq!(response.status().as_u16(), 502);
        }
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = errors::relay_error_to_response(RelayError::NotFound("gone".into()));
        assert_eq!(response.status().as_u16(), 404);
    }

    #[test]
    fn test_internal_detail_is_not_leaked() {
        let response =
            errors::relay_error_to_response(RelayError::internal("secret scratch path"));
        assert_eq!(response.status().as_u16(), 500);
    }
}
