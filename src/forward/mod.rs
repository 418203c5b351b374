//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → target.rs (extract ?url=, parse, https-only policy)
//!     → headers.rs (hop-by-hop filter, host override)
//!     → forwarder.rs (method/body policy, upstream call)
//!     → relay (status + headers + CORS, streamed body)
//! ```
//!
//! # Design Decisions
//! - All client-input rejections happen before any network I/O
//! - Bodies stream in both directions; nothing is collected into memory
//! - Redirects are relayed to the caller, never followed
//! - Upstream 4xx/5xx are successful relays, not errors

pub mod forwarder;
pub mod headers;
pub mod target;

pub use forwarder::{ClientInitError, Forwarder};
pub use headers::HOP_BY_HOP_HEADERS;
pub use target::Target;
