//! Core functionality for the relay
//!
//! This module contains the pipeline stages and the orchestrator that
//! sequences them per request.

pub mod audio;
pub mod llm;
pub mod relay;
pub mod store;
pub mod stt;
pub mod tts;
