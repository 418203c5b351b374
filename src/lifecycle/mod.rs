//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Bind → Serve
//!
//! Shutdown (shutdown.rs):
//!     SIGINT → trigger() → server stops accepting → drain → exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
