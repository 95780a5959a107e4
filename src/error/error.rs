//! Error types and handling for the tool registry

use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Main error type for registry building and discovery queries
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Structural validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// One descriptor document could not be parsed. Scoped to that document:
    /// the builder records a diagnostic and skips the server.
    #[error("Invalid descriptor document for server '{server}': {reason}")]
    InvalidInputDocument { server: String, reason: String },

    /// No valid descriptor documents were found. Fatal to the whole build;
    /// nothing is published.
    #[error("No valid descriptor documents found in '{dir}'")]
    NoInput { dir: String },

    /// The published registry artifact is missing or unreadable. Fatal to
    /// any query.
    #[error("Registry unavailable at '{path}': {reason}")]
    RegistryUnavailable { path: String, reason: String },

    /// Query referenced a server that is not in the registry
    #[error("Server not found: {server}")]
    ServerNotFound { server: String },

    /// Query referenced a tool that is not in the named server
    #[error("Tool not found: {server}/{tool}")]
    ToolNotFound { server: String, tool: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl RegistryError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an invalid-document error for one server
    pub fn invalid_document<S: Into<String>>(server: S, reason: S) -> Self {
        Self::InvalidInputDocument {
            server: server.into(),
            reason: reason.into(),
        }
    }

    /// Create a no-input error for an empty or missing descriptor store
    pub fn no_input<S: Into<String>>(dir: S) -> Self {
        Self::NoInput { dir: dir.into() }
    }

    /// Create a registry-unavailable error
    pub fn registry_unavailable<S: Into<String>>(path: S, reason: S) -> Self {
        Self::RegistryUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a server-not-found error
    pub fn server_not_found<S: Into<String>>(server: S) -> Self {
        Self::ServerNotFound {
            server: server.into(),
        }
    }

    /// Create a tool-not-found error
    pub fn tool_not_found<S: Into<String>>(server: S, tool: S) -> Self {
        Self::ToolNotFound {
            server: server.into(),
            tool: tool.into(),
        }
    }

    /// Get the error category for logging/metrics
    pub fn category(&self) -> &'static str {
        match self {
            RegistryError::Config { .. } => "config",
            RegistryError::Validation { .. } => "validation",
            RegistryError::InvalidInputDocument { .. } => "invalid_document",
            RegistryError::NoInput { .. } => "no_input",
            RegistryError::RegistryUnavailable { .. } => "registry_unavailable",
            RegistryError::ServerNotFound { .. } => "server_not_found",
            RegistryError::ToolNotFound { .. } => "tool_not_found",
            RegistryError::Io(_) => "io",
            RegistryError::Serde(_) => "serialization",
            RegistryError::Yaml(_) => "yaml",
            RegistryError::Internal(_) => "internal",
        }
    }
}
