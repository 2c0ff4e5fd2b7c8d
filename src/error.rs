//! Error types for the ledger explorer

use crate::endpoints::EndpointRole;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    /// No endpoint is registered for the requested role. Raised before any
    /// network call is attempted.
    MissingEndpoint(EndpointRole),
    SourceUnavailable(String),
    InvalidResponse(String),
    StorageError(String),
    ConfigError(String),
    IoError(String),
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExplorerError::MissingEndpoint(role) => {
                write!(f, "No endpoints found for {}", role)
            }
            ExplorerError::SourceUnavailable(msg) => write!(f, "Data source unavailable: {}", msg),
            ExplorerError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ExplorerError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            ExplorerError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ExplorerError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for ExplorerError {}

impl From<std::io::Error> for ExplorerError {
    fn from(err: std::io::Error) -> Self {
        ExplorerError::IoError(err.to_string())
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ExplorerError::InvalidResponse(err.to_string())
        } else {
            ExplorerError::SourceUnavailable(err.to_string())
        }
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ExplorerError>;
