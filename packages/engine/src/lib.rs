// packages/engine/src/lib.rs
//! Brandview Mock Engine Library
//!
//! Stands in for the dashboard's backend during development and demos. The
//! same API contract is served two ways:
//!
//! - **interception**: a tower layer around the outgoing HTTP client that
//!   answers registered requests without touching the network
//! - **fallback**: an HTTP server answering the same routes when
//!   interception is not installed
//!
//! # Architecture
//!
//! The remaining modules are shared by both adapters:
//!
//! - **contract**: request/response types and every endpoint's responder
//! - **routing**: path patterns and the handler registry
//! - **mode**: mock/real resolution from configuration
//! - **observability**: tracing and metrics setup
//! - **utils**: configuration, errors, identifier generation

// Public module exports
pub mod contract;
pub mod fallback;
pub mod interception;
pub mod mode;
pub mod observability;
pub mod routing;
pub mod utils;

// Re-export commonly used types
pub use contract::{ApiRequest, ApiResponse, MockRequest, MockResponse};
pub use fallback::{FallbackRouter, FallbackServer, FallbackService};
pub use interception::{HttpPassthrough, InstallState, InterceptionRuntime};
pub use mode::Mode;
pub use routing::{HandlerEntry, HandlerRegistry, RealModePolicy};
pub use utils::config::MockConfig;
pub use utils::errors::{MockError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_HASH: &str = env!("GIT_HASH");

/// Engine build information
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub rustc_version: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: VERSION,
            git_hash: GIT_HASH,
            build_timestamp: env!("BUILD_TIMESTAMP"),
            rustc_version: env!("RUSTC_VERSION"),
        }
    }
}
