//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Config struct definitions (Config, ServerConfig, IdentityConfig, ...)
//! - [`defaults`]: serde default value functions
//! - [`validation`]: startup validation

mod defaults;
mod types;
mod validation;

pub use types::{
    Config, ConfigError, IdentityConfig, LogConfig, ServerConfig, TransportKind, WhoisConfig,
};
pub use validation::{ValidationError, validate};
