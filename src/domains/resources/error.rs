//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The requested resource was not found.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A resource with the same URI is already registered.
    #[error("Resource already registered: {0}")]
    AlreadyRegistered(String),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a new "already registered" error.
    pub fn already_registered(uri: impl Into<String>) -> Self {
        Self::AlreadyRegistered(uri.into())
    }
}
