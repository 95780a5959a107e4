//! Tooldex - compact tool index and discovery queries for MCP server
//! descriptor documents
//!
//! This crate compacts a directory of verbose per-server descriptor
//! documents into one small registry artifact, then answers discovery
//! queries against it: list servers, list a server's tools, find a tool by
//! exact name, free-text search, full tool detail, and aggregate
//! statistics. Querying the compact registry first keeps each discovery
//! step cheap; the full descriptor document is only needed when a tool is
//! actually invoked.

pub mod config;
pub mod error;
pub mod registry;

pub use config::Config;
pub use error::{RegistryError, Result};
pub use registry::{QueryEngine, Registry, RegistryBuilder};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "tooldex.yaml";

/// Default descriptor store directory
pub const DEFAULT_SERVERS_DIR: &str = "servers";

/// Default registry artifact path
pub const DEFAULT_REGISTRY_FILE: &str = "registry.json";
