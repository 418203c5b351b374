//! Shared utilities for integration tests.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use cors_proxy::config::ProxyConfig;
use cors_proxy::lifecycle::Shutdown;
use cors_proxy::HttpServer;

/// Spawn the proxy on an ephemeral port, returning its address and the
/// shutdown handle that stops it.
pub async fn spawn_proxy() -> (SocketAddr, Shutdown) {
    let config = ProxyConfig::default();
    let server = HttpServer::new(&config).expect("HTTPS client init");

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// A local port with nothing listening on it, for unreachable-upstream
/// tests. Bound and released; the kernel will not hand it out again
/// immediately.
#[allow(dead_code)]
pub async fn unreachable_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
