//! Error taxonomy and the JSON error envelope.
//!
//! # Responsibilities
//! - Classify failures: client input (400) vs upstream unreachable (502)
//! - Render every failure as `{"error": "<message>"}` with CORS headers
//! - Format transport errors into a stable, non-leaking detail string
//!
//! # Design Decisions
//! - Upstream 3xx/4xx/5xx responses are NOT errors; they relay verbatim
//! - Client-input errors are detected before any network I/O
//! - All failures convert at the handler; none propagate as panics

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Errors produced by the forwarding pipeline.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The `url` query parameter was absent or empty.
    #[error("Missing ?url= parameter")]
    MissingParameter,

    /// The `url` query parameter did not parse as an absolute URL.
    #[error("Invalid target URL")]
    InvalidTarget,

    /// The target URL's scheme was not https.
    #[error("Only https targets are allowed")]
    SchemeNotAllowed,

    /// The outbound network call failed (DNS, TLS, connect, transport).
    #[error("Failed to reach upstream: {0}")]
    Upstream(String),
}

impl ProxyError {
    /// HTTP status carried by the error envelope.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingParameter
            | ProxyError::InvalidTarget
            | ProxyError::SchemeNotAllowed => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Wire shape of an error response body.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: String,
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = Json(ErrorEnvelope {
            error: self.to_string(),
        });
        let mut response = (status, envelope).into_response();
        response.headers_mut().insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        response
    }
}

/// Render a transport error as its Display chain, sources joined with `: `.
///
/// The hyper-util top-level message alone ("client error (Connect)") hides
/// the cause; the chain keeps connection-refused-level detail without
/// reflecting request contents or debug internals.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
