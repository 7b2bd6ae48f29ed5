// packages/engine/src/utils/errors.rs
//! Error types for the mock engine
//!
//! Only startup-time and transport failures are errors. Validation failures
//! and "not implemented in real mode" are ordinary responses and never reach
//! this type.

use thiserror::Error;

/// Errors raised by the mock engine
#[derive(Debug, Error)]
pub enum MockError {
    /// Malformed configuration or registry definition
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Route pattern could not be parsed
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// Two registry entries would match the same request
    #[error("ambiguous route: {method} {incoming} overlaps {existing}")]
    AmbiguousRoute {
        method: String,
        existing: String,
        incoming: String,
    },

    /// Interception could not be installed
    #[error("interception install failed: {0}")]
    InstallFailed(String),

    /// Network or protocol failure in the passthrough client or server
    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to load configuration: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MockError>;
