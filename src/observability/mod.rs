//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, request id correlated)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; RUST_LOG overrides the config level
//! - Metric updates are cheap (atomic increments)
//! - A failed metrics-endpoint bind degrades the proxy, never stops it

pub mod logging;
pub mod metrics;
