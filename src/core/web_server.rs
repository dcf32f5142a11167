//! Uptime web server
//!
//! Two static liveness routes for external uptime checkers, fully decoupled
//! from the Telegram side. Binding happens at startup (a bind failure is
//! fatal); serving runs in its own tokio task.

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::error::AppResult;

/// Bind the uptime listener on the given port.
pub async fn bind(port: u16) -> AppResult<TcpListener> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting uptime server on http://{}", addr);
    log::info!("  /        - Liveness text");
    log::info!("  /health  - Liveness JSON");
    Ok(listener)
}

/// Serve the uptime routes until the process exits.
pub async fn serve(listener: TcpListener) -> AppResult<()> {
    let app = Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler));

    axum::serve(listener, app).await?;
    Ok(())
}

/// GET /: plain-text liveness payload.
async fn home_handler() -> impl IntoResponse {
    "Free Fire Userbot is running!"
}

/// GET /health: JSON liveness payload.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "alive", "bot": "running" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_on_an_ephemeral_port() {
        let listener = bind(0).await.unwrap();
        let addr = listener.local_addr().unwrap();
        assert_ne!(addr.port(), 0);
    }
}
