//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::relay::RelayService;
use crate::core::store::AudioStore;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across threads.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Request orchestrator
    pub relay: Arc<RelayService>,
    /// Token-addressed store for synthesized audio
    pub audio_store: Arc<AudioStore>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config) -> Self {
        let audio_store = Arc::new(AudioStore::new());
        let relay = Arc::new(RelayService::new(&config, Arc::clone(&audio_store)));
        Self {
            config: Arc::new(config),
            relay,
            audio_store,
        }
    }
}
