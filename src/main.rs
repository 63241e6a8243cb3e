//! Voxrelay - voice/text chat relay
//!
//! HTTP service relaying chat turns through remote LLM, transcription and
//! speech-synthesis backends

#![allow(missing_docs)]

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use voxrelay::server;

#[actix_web::main]
async fn main() -> ExitCode {
    // Pick up GROQ_API_KEY and friends from .env when present
    let _ = dotenvy::dotenv();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .with_thread_ids(false)
        .init();

    // Start server (auto-loads config/voxrelay.yaml)
    match server::builder::run_server().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
