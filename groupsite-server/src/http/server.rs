//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default, exposing `Content-Range`
//! - Per-request spans tagged with the target resource
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Request};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::routes;
use crate::db::QueryGateway;

/// Origins accepted when CORS is not permissive (react-admin dev servers)
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

/// Shared application state
pub struct AppState {
    gateway: Arc<dyn QueryGateway>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn QueryGateway>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &dyn QueryGateway {
        self.gateway.as_ref()
    }
}

fn cors_layer(permissive: bool) -> CorsLayer {
    let cors = if permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::new().allow_origin(Any)
    } else {
        CorsLayer::new().allow_origin(LOCAL_ORIGINS.map(HeaderValue::from_static))
    };

    cors.allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([header::CONTENT_RANGE])
}

/// First path segment, i.e. the react-admin resource a request targets
fn resource_of(path: &str) -> &str {
    path.trim_start_matches('/').split('/').next().unwrap_or_default()
}

fn request_span(request: &Request<Body>) -> Span {
    let path = request.uri().path();
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %path,
        resource = resource_of(path),
    )
}

/// Build the router with every resource mounted.
pub fn build_router(gateway: Arc<dyn QueryGateway>, config: &ServerConfig) -> Router {
    let state = AppState::new(gateway);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::contacts::router())
        .merge(routes::group_description::router())
        .merge(routes::reviews::router())
        .layer(cors_layer(config.cors_permissive))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let gateway = Arc::new(PgGateway::connect(&database_url, DEFAULT_MAX_CONNECTIONS).await?);
/// run_server(gateway, ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    gateway: Arc<dyn QueryGateway>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let app = build_router(gateway, &config);

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
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryGateway;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3030);
        assert!(!config.cors_permissive);
    }

    #[test]
    fn spans_carry_the_resource() {
        assert_eq!(resource_of("/contacts/7"), "contacts");
        assert_eq!(resource_of("/group-description"), "group-description");
        assert_eq!(resource_of("reviews"), "reviews");
        assert_eq!(resource_of("/"), "");
    }

    #[tokio::test]
    async fn cors_exposes_content_range() {
        let app = build_router(Arc::new(MemoryGateway::new()), &ServerConfig::default());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/contacts")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let exposed = response
            .headers()
            .get(header::ACCESS_CONTROL_EXPOSE_HEADERS)
            .expect("expose header missing");
        assert!(exposed.to_str().unwrap().eq_ignore_ascii_case("content-range"));
    }
}
