//! Core handler infrastructure.
//!
//! This module contains the fundamental types for the event handler
//! system: the handler trait, the per-line context and the registry.

pub mod context;
pub mod registry;

pub use context::{Context, FnHandler, Handler, HandlerResult, handler_fn};
pub use registry::Registry;
