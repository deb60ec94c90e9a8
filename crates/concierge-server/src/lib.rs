//! HTTP surface for the concierge backend.
//!
//! Exposes `POST /api/chat` over the conversation orchestrator.

mod chat;

pub use chat::{ChatRequest, ChatResponse};

use axum::Router;
use axum::routing::post;
use concierge_config::ServerConfig;
use concierge_core::Orchestrator;
use log::info;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

/// Errors returned while serving HTTP.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Binding or serving the listener failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared state handed to every request handler.
pub struct AppState {
    /// Conversation orchestrator driving each chat turn.
    pub orchestrator: Arc<Orchestrator>,
}

/// Build the application router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/chat", post(chat::handle_chat))
        .with_state(state)
}

/// Bind the configured address and serve requests until shutdown.
pub async fn serve(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("listening (addr={addr})");
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
