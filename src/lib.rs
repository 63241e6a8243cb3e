//! # Voxrelay
//!
//! A voice/text chat relay. One HTTP request in (typed text or an uploaded
//! audio clip), one chat turn out: the reply text from a hosted LLM plus a
//! retrieval URL for the synthesized speech of that reply.
//!
//! All substantive work is delegated to remote backends over HTTP:
//!
//! - speech recognition (`/audio/transcriptions`, OpenAI-compatible)
//! - language generation (`/chat/completions`, OpenAI-compatible)
//! - speech synthesis (gTTS-style `/translate_tts`)
//!
//! Local logic is limited to audio container transcoding, a markdown-strip
//! pass before synthesis, scratch-artifact lifecycle, and route wiring.
//!
//! ## Running
//!
//! ```rust,no_run
//! use voxrelay::server;
//!
//! #[actix_web::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     server::builder::run_server().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use crate::config::Config;
pub use crate::core::relay::{ChatExchange, RelayService};
pub use crate::utils::error::{RelayError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
