//! Outbound header construction.

use axum::http::{header, HeaderMap, HeaderValue};

use super::target::Target;

/// Headers meaningful only on a single transport connection; they must not
/// cross a proxy hop (RFC 7230 section 6.1).
pub const HOP_BY_HOP_HEADERS: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "transfer-encoding",
    "upgrade",
];

/// True when `name` must be stripped before forwarding.
pub fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS
        .iter()
        .any(|hop| name.eq_ignore_ascii_case(hop))
}

/// Copy inbound headers for the upstream request.
///
/// Hop-by-hop headers are dropped, duplicate keys collapse to the last
/// value seen, and `host` is overwritten with the target's authority.
pub fn build_forward_headers(inbound: &HeaderMap, target: &Target) -> HeaderMap {
    let mut outbound = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        outbound.insert(name.clone(), value.clone());
    }

    // url guarantees an ASCII host for https targets.
    if let Ok(host) = HeaderValue::from_str(&target.host_header()) {
        outbound.insert(header::HOST, host);
    }

    outbound
}
