// packages/engine/src/routing/handler_registry.rs
//! Handler registry mapping (method, path pattern) to responders
//!
//! The registry is built once at startup and is read-only afterwards, so
//! both adapters share it through an `Arc` without locking. Construction
//! rejects any pair of entries that could match the same request; the
//! first request can never discover an ambiguity.

use crate::contract::{ApiRequest, ApiResponse};
use crate::mode::Mode;
use crate::routing::path_pattern::{PathParams, PathPattern};
use crate::utils::errors::{MockError, Result};
use hyper::Method;
use std::fmt;
use tracing::{debug, info};

/// Shared response computation. Pure apart from id generation and clock reads.
pub type Responder = fn(&ApiRequest) -> ApiResponse;

/// Behavior of an entry when the engine runs in [`Mode::Real`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealModePolicy {
    /// Answer 501 with the `not_implemented` tag
    NotImplemented,
    /// Keep serving the mock payload until a real backend exists
    Bridge,
}

/// One registered operation
#[derive(Clone)]
pub struct HandlerEntry {
    pub method: Method,
    pub pattern: PathPattern,
    pub operation: &'static str,
    pub real_mode: RealModePolicy,
    pub responder: Responder,
}

impl HandlerEntry {
    pub fn new(
        method: Method,
        pattern: &str,
        operation: &'static str,
        real_mode: RealModePolicy,
        responder: Responder,
    ) -> Result<Self> {
        Ok(Self {
            method,
            pattern: PathPattern::parse(pattern)?,
            operation,
            real_mode,
            responder,
        })
    }

    /// Compute the response for `request` under `mode`
    pub fn respond(&self, request: &ApiRequest, mode: Mode) -> ApiResponse {
        match (mode, self.real_mode) {
            (Mode::Real, RealModePolicy::NotImplemented) => {
                ApiResponse::not_implemented(self.operation)
            }
            _ => (self.responder)(request),
        }
    }
}

impl fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .field("operation", &self.operation)
            .field("real_mode", &self.real_mode)
            .finish()
    }
}

/// Result of a successful lookup
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub entry: &'a HandlerEntry,
    pub params: PathParams,
}

/// Ordered set of handler entries
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    entries: Vec<HandlerEntry>,
}

impl HandlerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry, failing on the first ambiguous entry
    pub fn from_entries(entries: impl IntoIterator<Item = HandlerEntry>) -> Result<Self> {
        let mut registry = Self::new();
        for entry in entries {
            registry.register(entry)?;
        }

        info!("Handler registry built with {} routes", registry.len());
        Ok(registry)
    }

    /// Add an entry
    pub fn register(&mut self, entry: HandlerEntry) -> Result<()> {
        let clash = self
            .entries
            .iter()
            .find(|existing| {
                existing.method == entry.method && existing.pattern.overlaps(&entry.pattern)
            });

        if let Some(existing) = clash {
            return Err(MockError::AmbiguousRoute {
                method: entry.method.to_string(),
                existing: existing.pattern.to_string(),
                incoming: entry.pattern.to_string(),
            });
        }

        debug!("Registering {} {} ({})", entry.method, entry.pattern, entry.operation);
        self.entries.push(entry);
        Ok(())
    }

    /// Find the entry for a concrete request
    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.entries
            .iter()
            .filter(|entry| entry.method == *method)
            .find_map(|entry| {
                entry
                    .pattern
                    .matches(path)
                    .map(|params| RouteMatch { entry, params })
            })
    }

    /// Find an entry by operation name
    pub fn operation(&self, operation: &str) -> Option<&HandlerEntry> {
        self.entries.iter().find(|entry| entry.operation == operation)
    }

    pub fn entries(&self) -> &[HandlerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable route listing
    pub fn export_routes(&self) -> String {
        let mut output = String::from("# Mock handler registry\n\n");

        for entry in &self.entries {
            output.push_str(&format!(
                "{} {} -> {} ({:?})\n",
                entry.method, entry.pattern, entry.operation, entry.real_mode
            ));
        }

        output
    }
}
