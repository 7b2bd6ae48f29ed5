// packages/engine/src/fallback/mod.rs
//! Fallback route layer
//!
//! Answers the mock contract when interception is absent: before the
//! runtime installs, after a failed install, or in callers that never
//! install it. Each request re-checks the injected [`Mode`](crate::mode::Mode).
//!
//! - **Router**: registry dispatch plus real-mode policy
//! - **Server**: hyper HTTP/1 accept loop with graceful shutdown

pub mod router;
pub mod server;

pub use router::{FallbackRouter, FallbackService};
pub use server::FallbackServer;
