//! AI Chat Backend
//!
//! A REST API server that forwards chat messages to one of several LLM
//! providers (OpenAI, Gemini, OpenRouter, GitHub Models) and persists
//! conversation history.

mod api;
mod chat;
mod config;
mod error;
mod providers;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use api::AppState;
use chat::SqliteStore;
use config::Config;
use providers::{DefaultCredentials, ProviderClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Initialize storage
    let store = SqliteStore::new(&config.storage.database_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize storage: {}", e))?;

    // Provider adapter with the configured fallback credentials
    let providers = ProviderClient::new(DefaultCredentials {
        openai: config.providers.openai_api_key.clone(),
        gemini: config.providers.gemini_api_key.clone(),
    });

    let state = AppState {
        store: Arc::new(store),
        providers,
    };

    let app = api::build_router(state);

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("🚀 Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
