// packages/engine/src/utils/mod.rs
//! Common utilities shared by both adapters
//!
//! - **config**: Layered configuration (defaults, file, environment)
//! - **errors**: Crate-wide error type
//! - **ids**: Opaque identifier generation

pub mod config;
pub mod errors;
pub mod ids;

pub use config::MockConfig;
pub use errors::{MockError, Result};
pub use ids::new_id;
