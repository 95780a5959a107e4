//! Configuration module for Tooldex
//!
//! Loads runtime configuration from an optional YAML file, applies
//! environment variable overrides, and validates the result.

mod config;

pub use config::{Config, LoggingConfig};
