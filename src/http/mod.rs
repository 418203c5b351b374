//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, any-method any-path dispatch)
//!     → request.rs (request id assignment)
//!     → forward::Forwarder (validate, transform, forward, relay)
//!     → response to client
//! ```

pub mod request;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
