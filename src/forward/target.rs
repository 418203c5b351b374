//! Target URL extraction and policy.

use axum::http::Uri;
use url::Url;

use crate::error::ProxyError;

/// A validated forwarding target.
///
/// Invariant: the scheme is exactly `https` and the URL has an `http::Uri`
/// form the client can dial.
#[derive(Debug, Clone)]
pub struct Target {
    url: Url,
    uri: Uri,
}

impl Target {
    /// The target as an outbound request URI.
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Value for the outbound `host` header: `host[:port]`, port present
    /// only when it is not the scheme default.
    pub fn host_header(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// The normalized target URL string.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

/// Pull the forwarding target out of the inbound request URI.
///
/// The `url` query parameter must be present, non-empty, an absolute URL,
/// and https. Every rejection happens here, before any network activity.
/// When the parameter repeats, the first occurrence wins.
pub fn extract_target(uri: &Uri) -> Result<Target, ProxyError> {
    let query = uri.query().unwrap_or("");
    let raw = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
        .ok_or(ProxyError::MissingParameter)?;

    // An empty `url=` names no target; same rejection as an absent one.
    if raw.is_empty() {
        return Err(ProxyError::MissingParameter);
    }

    let url = Url::parse(&raw).map_err(|_| ProxyError::InvalidTarget)?;
    if url.scheme() != "https" {
        return Err(ProxyError::SchemeNotAllowed);
    }

    // A Url the http stack cannot represent (e.g. userinfo in the
    // authority) is still a client-input rejection, not a transport one.
    let uri = Uri::try_from(url.as_str()).map_err(|_| ProxyError::InvalidTarget)?;

    Ok(Target { url, uri })
}
