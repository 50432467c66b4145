//! Axum server setup
//!
//! Server skeleton with:
//! - CORS restricted to configured origins (localhost by default)
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::AgentStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// Origins allowed by CORS (default: localhost:3000)
    pub cors_origins: Vec<HeaderValue>,

    /// Allow any origin (default: false)
    ///
    /// WARNING: Setting this to true ignores `cors_origins`.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ],
            cors_permissive: false,
        }
    }
}

/// Parse origin strings (e.g. `http://64.176.214.135:3000`) into header values.
pub fn parse_origins<S: AsRef<str>>(origins: &[S]) -> Result<Vec<HeaderValue>, ServerError> {
    origins
        .iter()
        .map(|o| {
            let o = o.as_ref().trim();
            HeaderValue::from_str(o).map_err(|_| ServerError::InvalidOrigin(o.to_owned()))
        })
        .collect()
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AgentStore>,
}

/// Build the application router with all routes and middleware.
pub fn build_router(store: Arc<dyn AgentStore>, config: &ServerConfig) -> Router {
    let state = AppState { store };

    let cors = if config.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(config.cors_origins.clone())
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .merge(routes::health::router())
        .merge(routes::agents::router())
        .merge(routes::stats::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// The store (and the pool inside it) is owned by the caller, which is
/// responsible for closing it after this returns.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let store = Arc::new(AgentRepo::new(pool.clone()));
/// run_server(store, ServerConfig::default()).await?;
/// pool.close().await;
/// ```
pub async fn run_server(
    store: Arc<dyn AgentStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let app = build_router(store, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid CORS origin: {0}")]
    InvalidOrigin(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn parse_origins_accepts_urls_and_rejects_control_chars() {
        let parsed =
            parse_origins(&["http://64.176.214.135:3000", " http://localhost:8080 "]).unwrap();
        assert_eq!(parsed[0], "http://64.176.214.135:3000");
        assert_eq!(parsed[1], "http://localhost:8080");

        let err = parse_origins(&["http://bad\norigin"]).unwrap_err();
        assert!(matches!(err, ServerError::InvalidOrigin(_)));
    }
}
