//! Text chat endpoint

use crate::server::routes::errors;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

/// Text chat request body
#[derive(Debug, Deserialize)]
pub struct ProcessTextRequest {
    /// What the user typed
    pub user_text: String,
}

/// Chat turn response body (shared with the audio endpoint)
#[derive(Debug, Serialize)]
pub struct ExchangeResponse {
    /// Echo of the user's text (typed or transcribed)
    pub user_text: String,
    /// The model's reply, unmodified
    pub bot_reply: String,
    /// Retrieval URL for the synthesized reply audio
    pub audio_url: String,
}

impl ExchangeResponse {
    /// Build the response payload from a completed exchange
    pub fn new(user_text: String, bot_reply: String, audio_token: Uuid) -> Self {
        Self {
            user_text,
            bot_reply,
            audio_url: format!("/get_audio/{}", audio_token),
        }
    }
}

/// Text chat endpoint
///
/// Takes typed text, returns the model reply plus an audio URL for its
/// synthesized speech.
pub async fn process_text(
    state: web::Data<AppState>,
    request: web::Json<ProcessTextRequest>,
) -> ActixResult<HttpResponse> {
    let user_text = request.into_inner().user_text;

    if user_text.trim().is_empty() {
        return Ok(errors::validation_error("user_text must not be empty"));
    }

    info!(text_len = user_text.len(), "Text chat request");

    match state.relay.text_exchange(user_text).await {
        Ok(exchange) => Ok(HttpResponse::Ok().json(ExchangeResponse::new(
            exchange.user_text,
            exchange.bot_reply,
            exchange.audio_token,
        ))),
        Err(e) => {
            error!("Text exchange error: {}", e);
            Ok(errors::relay_error_to_response(e))
        }
    }
}
