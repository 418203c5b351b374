//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router: any method, any path, one forwarding handler
//! - Wire up middleware (request id, tracing)
//! - Serve with graceful shutdown
//! - Convert pipeline errors into the JSON envelope and record metrics

use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::forward::{ClientInitError, Forwarder};
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Forwarder,
}

/// HTTP server hosting the forwarder.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &ProxyConfig) -> Result<Self, ClientInitError> {
        let forwarder = Forwarder::new(&config.upstream)?;
        let router = Self::build_router(AppState { forwarder });
        Ok(Self { router })
    }

    /// Build the axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(forward_handler))
            .route("/{*path}", any(forward_handler))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single forwarding handler: any method, any path.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().unwrap_or("unknown").to_string();
    let method = request.method().to_string();

    match state.forwarder.forward(request).await {
        Ok(response) => {
            let status = response.status();
            tracing::debug!(
                request_id = %request_id,
                method = %method,
                status = status.as_u16(),
                "Relayed upstream response"
            );
            metrics::record_request(&method, status.as_u16(), start_time);
            response.into_response()
        }
        Err(error) => {
            let status = error.status();
            if status.is_server_error() {
                tracing::error!(
                    request_id = %request_id,
                    method = %method,
                    error = %error,
                    "Upstream unreachable"
                );
            } else {
                tracing::warn!(
                    request_id = %request_id,
                    method = %method,
                    error = %error,
                    "Rejected request"
                );
            }
            metrics::record_request(&method, status.as_u16(), start_time);
            error.into_response()
        }
    }
}
