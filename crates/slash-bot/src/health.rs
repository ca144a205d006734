//! Health check endpoint

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serenity::prelude::TypeMapKey;
use tokio::sync::RwLock;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub bot_username: Option<String>,
    pub uptime_secs: u64,
    pub commands_registered: bool,
}

/// Shared application state for health checks
#[derive(Clone)]
pub struct AppState {
    pub start_time: SystemTime,
    pub bot_username: Arc<RwLock<Option<String>>>,
    pub commands_registered: Arc<AtomicBool>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            start_time: SystemTime::now(),
            bot_username: Arc::new(RwLock::new(None)),
            commands_registered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn set_bot_username(&self, username: String) {
        let mut guard = self.bot_username.write().await;
        *guard = Some(username);
    }

    pub fn mark_commands_registered(&self) {
        self.commands_registered.store(true, Ordering::SeqCst);
    }

    pub async fn status(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
            bot_username: self.bot_username.read().await.clone(),
            uptime_secs: self.start_time.elapsed().unwrap_or_default().as_secs(),
            commands_registered: self.commands_registered.load(Ordering::SeqCst),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeMapKey for AppState {
    type Value = AppState;
}

async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    (StatusCode::OK, Json(state.status().await))
}

async fn live_handler() -> StatusCode {
    StatusCode::OK
}

/// Create the health check router
pub fn create_health_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/live", get(live_handler))
        .with_state(state)
}

/// Start the health check server
pub async fn start_health_server(state: AppState, port: u16) -> anyhow::Result<()> {
    let app = create_health_router(state);
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Health check server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_state_new() {
        let state = AppState::new();
        let status = state.status().await;
        assert_eq!(status.status, "ok");
        assert!(status.bot_username.is_none());
        assert!(!status.commands_registered);
    }

    #[tokio::test]
    async fn test_set_bot_username() {
        let state = AppState::new();
        state.set_bot_username("slashbot".to_string()).await;
        assert_eq!(
            state.status().await.bot_username,
            Some("slashbot".to_string())
        );
    }

    #[tokio::test]
    async fn test_commands_registered_visible_through_clones() {
        let state = AppState::new();
        let shared = state.clone();
        shared.mark_commands_registered();
        assert!(state.status().await.commands_registered);
    }

    #[test]
    fn test_health_status_serde() {
        let status = HealthStatus {
            status: "ok".to_string(),
            bot_username: Some("testbot".to_string()),
            uptime_secs: 100,
            commands_registered: true,
        };
        let json = serde_json::to_string(&status).unwrap();
        let back: HealthStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, "ok");
        assert_eq!(back.uptime_secs, 100);
        assert_eq!(back.bot_username, Some("testbot".to_string()));
        assert!(back.commands_registered);
    }

    #[tokio::test]
    async fn test_health_server_serves_health_and_live() {
        let state = AppState::new();
        state.set_bot_username("slashbot".to_string()).await;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = create_health_router(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let body = http_get(addr, "/health").await;
        assert!(body.starts_with("HTTP/1.1 200"), "{}", body);
        assert!(body.contains("\"bot_username\":\"slashbot\""), "{}", body);

        let body = http_get(addr, "/live").await;
        assert!(body.starts_with("HTTP/1.1 200"), "{}", body);
    }

    async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            path
        );
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }
}
