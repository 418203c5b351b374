//! The forwarding pipeline: validate, transform, forward, relay.

use std::sync::OnceLock;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, Response};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::error::{error_chain, ProxyError};

use super::headers::build_forward_headers;
use super::target::extract_target;

/// HTTPS-capable upstream client.
type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, Body>;

/// Failure to construct the HTTPS client at startup.
#[derive(Debug, Error)]
#[error("failed to initialize HTTPS client: {0}")]
pub struct ClientInitError(String);

/// Stateless request forwarder.
///
/// Each call runs the full validate → transform → forward → relay pipeline.
/// Nothing outlives an invocation except the client handle, whose
/// connection reuse is internal to hyper-util.
#[derive(Clone)]
pub struct Forwarder {
    client: HttpsClient,
}

impl Forwarder {
    /// Build the forwarder and its HTTPS client.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ClientInitError> {
        // rustls needs a process-wide crypto provider; install ring exactly
        // once no matter how many forwarders the process constructs.
        static CRYPTO_PROVIDER: OnceLock<Result<(), ()>> = OnceLock::new();
        let installed = CRYPTO_PROVIDER.get_or_init(|| {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| ())
        });
        if installed.is_err() {
            return Err(ClientInitError(
                "rustls crypto provider install failed".to_string(),
            ));
        }

        let mut connector = HttpConnector::new();
        connector.enforce_http(false);
        connector.set_nodelay(config.tcp_nodelay);

        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .map_err(|e| ClientInitError(format!("native TLS roots unavailable: {e}")))?
            .https_only()
            .enable_http1()
            .enable_http2()
            .wrap_connector(connector);

        // The legacy client performs no redirect handling of its own;
        // upstream 3xx relay to the caller untouched.
        let client = Client::builder(TokioExecutor::new())
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .build(https);

        Ok(Self { client })
    }

    /// Run the pipeline for one inbound request.
    pub async fn forward(&self, request: Request<Body>) -> Result<Response<Body>, ProxyError> {
        let target = extract_target(request.uri())?;

        let (parts, body) = request.into_parts();

        // GET/HEAD never carry a body upstream; everything else streams the
        // inbound body through without buffering.
        let outbound_body = if may_have_body(&parts.method) {
            body
        } else {
            Body::empty()
        };

        let mut outbound = Request::new(outbound_body);
        *outbound.method_mut() = parts.method;
        *outbound.uri_mut() = target.uri().clone();
        *outbound.headers_mut() = build_forward_headers(&parts.headers, &target);

        let upstream = self
            .client
            .request(outbound)
            .await
            .map_err(|e| ProxyError::Upstream(error_chain(&e)))?;

        let (mut parts, body) = upstream.into_parts();
        parts.headers.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );

        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

/// Whether a method may carry a request body across the proxy.
///
/// The check is on the method token, case-insensitively, so extension
/// methods spelled in lowercase behave like their canonical forms.
fn may_have_body(method: &Method) -> bool {
    let name = method.as_str();
    !(name.eq_ignore_ascii_case("GET") || name.eq_ignore_ascii_case("HEAD"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_head_carry_no_body() {
        assert!(!may_have_body(&Method::GET));
        assert!(!may_have_body(&Method::HEAD));
        assert!(!may_have_body(&Method::from_bytes(b"get").unwrap()));
        assert!(!may_have_body(&Method::from_bytes(b"Head").unwrap()));
    }

    #[test]
    fn test_other_methods_forward_the_body() {
        assert!(may_have_body(&Method::POST));
        assert!(may_have_body(&Method::PUT));
        assert!(may_have_body(&Method::PATCH));
        assert!(may_have_body(&Method::DELETE));
        assert!(may_have_body(&Method::OPTIONS));
    }
}
