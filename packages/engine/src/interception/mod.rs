// packages/engine/src/interception/mod.rs
//! Client-side request interception
//!
//! - **Runtime**: one-shot, best-effort installation with an observable
//!   {not installed, installed, failed} state
//! - **HTTP Interceptor**: tower layer answering registered requests locally
//! - **Passthrough**: real network client for everything else
//!
//! # Architecture
//!
//! ```text
//! Caller
//!   │
//!   └─ Request → InterceptService ──(installed & registered)──► shared contract
//!                      │
//!                      └─(otherwise)──► HttpPassthrough → network → fallback routes
//! ```

pub mod http_interceptor;
pub mod passthrough;
pub mod runtime;

// Re-export commonly used types
pub use http_interceptor::{InterceptLayer, InterceptService};
pub use passthrough::HttpPassthrough;
pub use runtime::{InstallState, InterceptionRuntime};
