//! Server startup and configuration loading

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use tracing::info;

/// Run the server with automatic configuration loading
///
/// Loads `config/voxrelay.yaml` when present, otherwise starts from
/// defaults; either way the Groq credential must resolve (config value or
/// `GROQ_API_KEY`) or startup fails.
pub async fn run_server() -> Result<()> {
    info!("Starting voxrelay");

    let config_path = "config/voxrelay.yaml";
    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration loaded from {}", config_path);
            config
        }
        Err(e) => {
            info!(
                "No usable configuration file ({}), using defaults with environment credentials",
                e
            );
            Config::default()
        }
    };

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}:{}",
        config.server.host, config.server.port
    );
    info!("API Endpoints:");
    info!("   GET  /              - Chat UI");
    info!("   GET  /health        - Health check");
    info!("   POST /process_text  - Text chat turn");
    info!("   POST /process_audio - Voice chat turn");
    info!("   GET  /get_audio/:t  - Synthesized reply download");

    server.start().await
}
