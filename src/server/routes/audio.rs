//! Voice chat and audio download endpoints

use crate::server::routes::chat::ExchangeResponse;
use crate::server::routes::errors;
use crate::server::state::AppState;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Result as ActixResult};
use futures::StreamExt;
use tracing::{error, info};
use uuid::Uuid;

/// Voice chat endpoint
///
/// Accepts multipart/form-data with an `audio` field containing the
/// recording. Transcoding problems never surface here: an undecodable
/// upload is forwarded to the recognition backend unchanged.
pub async fn process_audio(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> ActixResult<HttpResponse> {
    info!("Voice chat request");

    let mut upload: Option<Vec<u8>> = None;

    while let Some(item) = payload.next().await {
        let mut field = match item {
            Ok(f) => f,
            Err(e) => {
                error!("Error reading multipart field: {}", e);
                return Ok(errors::validation_error(&format!(
                    "Invalid multipart data: {}",
                    e
                )));
            }
        };

        let field_name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match field_name.as_str() {
            "audio" => {
                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    match chunk {
                        Ok(bytes) => data.extend_from_slice(&bytes),
                        Err(e) => {
                            error!("Error reading upload chunk: {}", e);
                            return Ok(errors::validation_error("Error reading upload"));
                        }
                    }
                }
                upload = Some(data);
            }
            _ => {
                // Skip unknown fields
                while field.next().await.is_some() {}
            }
        }
    }

    let upload = match upload {
        Some(data) if !data.is_empty() => data,
        _ => return Ok(errors::validation_error("No audio upload provided")),
    };

    match state.relay.audio_exchange(upload).await {
        Ok(exchange) => Ok(HttpResponse::Ok().json(ExchangeResponse::new(
            exchange.user_text,
            exchange.bot_reply,
            exchange.audio_token,
        ))),
        Err(e) => {
            error!("Audio exchange error: {}", e);
            Ok(errors::relay_error_to_response(e))
        }
    }
}

/// Audio download endpoint
///
/// Resolves an opaque token minted by a prior exchange. Tokens are
/// single-use: the artifact is released once its bytes have been read, so a
/// repeat download is a 404 and nothing lingers in the scratch directory.
pub async fn get_audio(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let token = match Uuid::parse_str(&path.into_inner()) {
        Ok(token) => token,
        Err(_) => return Ok(errors::validation_error("Malformed audio token")),
    };

    let artifact = match state.audio_store.take(&token) {
        Some(artifact) => artifact,
        None => return Ok(errors::not_found_error("Unknown or already served audio token")),
    };

    match artifact.read() {
        // `artifact` drops here and removes the file after the bytes are out
        Ok(bytes) => Ok(HttpResponse::Ok().content_type("audio/mpeg").body(bytes)),
        Err(e) => {
            error!(%token, "Failed to read audio artifact: {}", e);
            Ok(errors::not_found_error("Audio artifact no longer available"))
        }
    }
}
