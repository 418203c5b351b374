//! HTTPS-only CORS forwarding proxy.
//!
//! One endpoint, any method, any path: the target URL arrives in the
//! `?url=` query parameter, the request is re-issued against it, and the
//! upstream response streams back with `access-control-allow-origin: *`.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────┐
//!                   │                 CORS PROXY                   │
//!                   │                                              │
//!   Client Request  │  ┌────────┐   ┌─────────────────────────┐   │
//!   ────────────────┼─▶│  http  │──▶│         forward         │   │
//!                   │  │ server │   │ target → headers → send │───┼──▶ Upstream
//!                   │  └────────┘   └─────────────────────────┘   │    (https)
//!                   │                           │                 │
//!   Client Response │        relay (+ CORS header, streamed)      │
//!   ◀───────────────┼───────────────────────────┘                 │
//!                   │                                              │
//!                   │  ┌────────────────────────────────────────┐ │
//!                   │  │          Cross-Cutting Concerns        │ │
//!                   │  │  config │ observability │ lifecycle    │ │
//!                   │  └────────────────────────────────────────┘ │
//!                   └──────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod error;
pub mod forward;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use forward::Forwarder;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
