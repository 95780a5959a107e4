//! Error handling module for Tooldex
//!
//! This module provides the error taxonomy shared by registry building and
//! discovery queries.

mod error;

// Re-export the main error types and utilities
pub use error::{RegistryError, Result};
