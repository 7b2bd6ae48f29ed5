// packages/engine/src/routing/mod.rs
//! Request routing shared by the interception and fallback adapters
//!
//! - **Path Pattern**: `/api/brands/:id` style patterns with named segments
//! - **Handler Registry**: (method, pattern) → responder table, validated
//!   for ambiguity at construction

pub mod handler_registry;
pub mod path_pattern;

pub use handler_registry::{HandlerEntry, HandlerRegistry, RealModePolicy, Responder, RouteMatch};
pub use path_pattern::{PathParams, PathPattern};
